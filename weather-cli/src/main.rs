//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Talking to the proxy through the client wrapper
//! - Human-friendly output formatting

use clap::Parser;

mod api;
mod cli;
mod dashboard;
mod units;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
