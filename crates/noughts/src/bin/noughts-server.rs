use clap::Parser;
use noughts::cli::{ServerArgs, init_tracing};
use noughts::prelude::*;

#[tokio::main]
async fn main() -> Result<(), NoughtsError> {
    let args = ServerArgs::parse();
    init_tracing("info");

    let server = NoughtsServer::builder()
        .bind(&args.bind_addr())
        .lobby_config(args.lobby_config())
        .build()
        .await?;

    server.run().await
}
