//! Command-line arguments and logging setup for the binaries.

use clap::Parser;
use noughts_lobby::LobbyConfig;
use tracing_subscriber::EnvFilter;

/// Noughts server - referees two-player games over TCP
#[derive(Parser, Debug)]
#[command(name = "noughts-server")]
#[command(about = "Pairs connecting clients and referees their games", long_about = None)]
#[command(version)]
pub struct ServerArgs {
    /// Port to listen on
    pub port: u16,

    /// Address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Most players waiting or in a game at once
    #[arg(long, default_value_t = 6)]
    pub max_players: usize,
}

impl ServerArgs {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn lobby_config(&self) -> LobbyConfig {
        LobbyConfig {
            max_players: self.max_players,
        }
    }
}

/// Noughts client - plays one game in the terminal
#[derive(Parser, Debug)]
#[command(name = "noughts-client")]
#[command(about = "Connects to a Noughts server and plays one game", long_about = None)]
#[command(version)]
pub struct ClientArgs {
    /// Port the server listens on
    pub port: u16,

    /// Server address
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}

impl ClientArgs {
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Installs a `fmt` subscriber writing to stderr.
///
/// The filter comes from `RUST_LOG`, falling back to `default_level` when
/// the variable is unset or invalid.
pub fn init_tracing(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
