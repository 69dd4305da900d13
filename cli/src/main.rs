mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{overlay, relate, union};
use tracing::Level;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);
    match &cli.command {
        Commands::Overlay(args) => overlay::run(&cli, args),
        Commands::Relate(args) => relate::run(&cli, args),
        Commands::Union(args) => union::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
