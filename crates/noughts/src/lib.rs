//! # Noughts
//!
//! Networked two-player noughts and crosses.
//!
//! A server accepts connections, pairs them in arrival order, and runs
//! each pair's game in its own task over a fixed-format wire protocol.
//! A client renders the game and forwards the user's moves.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use noughts::prelude::*;
//!
//! # async fn serve() -> Result<(), NoughtsError> {
//! let server = NoughtsServer::builder()
//!     .bind("0.0.0.0:4000")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```
//!
//! ## Crates
//!
//! - `noughts-transport`: connections and the TCP listener
//! - `noughts-protocol`: command tokens, integer frames, player identity
//! - `noughts-game`: board and rules
//! - `noughts-session`: the per-game turn loop and the player count
//! - `noughts-lobby`: pairing

pub mod cli;
mod client;
mod error;
mod server;
pub mod terminal;

pub use client::{ClientEvent, Frontend, GameClient, GameResult};
pub use error::NoughtsError;
pub use server::{NoughtsServer, NoughtsServerBuilder};

/// Common imports for using Noughts.
pub mod prelude {
    pub use crate::{
        ClientEvent, Frontend, GameClient, GameResult, NoughtsError, NoughtsServer,
        NoughtsServerBuilder,
    };
    pub use noughts_game::{Board, Cell, Square};
    pub use noughts_lobby::LobbyConfig;
    pub use noughts_protocol::PlayerId;
    pub use noughts_session::{Outcome, PlayerRegistry};
}
