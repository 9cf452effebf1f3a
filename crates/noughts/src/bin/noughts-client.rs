use std::process::ExitCode;

use clap::Parser;
use noughts::cli::{ClientArgs, init_tracing};
use noughts::prelude::*;
use noughts::terminal::{DISCONNECT_NOTICE, TerminalFrontend};

#[tokio::main]
async fn main() -> ExitCode {
    let args = ClientArgs::parse();
    init_tracing("warn");

    let mut frontend = TerminalFrontend::stdio();
    let result = play(&args.server_addr(), &mut frontend).await;

    let notice = match &result {
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "game ended early");
            Some(DISCONNECT_NOTICE)
        }
    };
    // Nothing more can be reported if stdout itself is gone.
    let _ = frontend.game_over(notice);

    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn play<F: Frontend>(addr: &str, frontend: &mut F) -> Result<GameResult, NoughtsError> {
    let client = GameClient::connect(addr).await?;
    client.play(frontend).await
}
