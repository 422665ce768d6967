//! aireadme CLI — scoped AI_README guidance for coding assistants.
//!
//! Collects guidance from the `AI_README.md` files governing a set of
//! changed paths, and edits named sections of those files idempotently.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
