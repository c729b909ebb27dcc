//! nbagent - Nullboard backup agent
//!
//! Accepts board snapshots over HTTP and keeps every revision as a JSON file
//! under the data directory. Deleted boards are moved aside, never erased.

use anyhow::Result;
use clap::Parser;

mod serve;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "nbagent",
    author,
    version,
    about = "A Nullboard backup agent",
    long_about = "Stores Nullboard board revisions on local disk. Every save becomes an \
                  immutable revision file; deleted boards are moved to a recovery area."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    #[command(flatten)]
    serve: serve::ServeArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    serve::run_serve(cli.serve).await
}
