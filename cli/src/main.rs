mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{render, top};
use tracing_subscriber::EnvFilter;

/// Verbosity counter -> default log level; RUST_LOG overrides.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("migramap={level},migramap_cli={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);
    match &cli.command {
        Commands::Render(args) => render::run(&cli, args),
        Commands::Top(args) => top::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
