//! hexpath CLI - Command-line interface
//!
//! Commands:
//! - route: Plan the moves of a scenario file
//! - bench: Time searches on a random obstacle field

mod bench_cmd;
mod route_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bench_cmd::BenchArgs;
use route_cmd::RouteArgs;

#[derive(Parser)]
#[command(name = "hexpath")]
#[command(about = "A* movement checks on hex-grid areas")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan every move in a scenario file
    Route(RouteArgs),
    /// Benchmark searches on a random obstacle field
    Bench(BenchArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Route(args) => route_cmd::run(args),
        Commands::Bench(args) => bench_cmd::run(args),
    }
}
