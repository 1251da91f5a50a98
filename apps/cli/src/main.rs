//! dexterm CLI — terminal viewer for the original roster.
//!
//! Fetches the fixed 151-entry listing, enriches every entry with its front
//! sprite, and renders the merged list once loading resolves.

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
