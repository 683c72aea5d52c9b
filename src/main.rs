//! # Rosterline Main Entry Point

use anyhow::Result;
use rosterline::{logging, AppController, ClientConfig, CommandLineArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();

    logging::init(&cmd_args)?;

    let config = ClientConfig::resolve(&cmd_args)?;
    tracing::info!(
        "Using profile '{}' against {}",
        config.profile_name(),
        config.server()
    );

    let mut app = AppController::new(&config)?;
    app.run().await
}
