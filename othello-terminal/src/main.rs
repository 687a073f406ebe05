//! Play Othello in the terminal.

mod shell;

use anyhow::Result;
use clap::Parser;
use othello_engine::GameEngine;
use shell::ShellOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Two-player Othello on one terminal
#[derive(Parser, Debug)]
#[command(name = "othello")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Do not mark the legal moves on the board
    #[arg(long)]
    no_hints: bool,

    /// Tracing filter directive, overriding RUST_LOG (e.g. "othello_engine=debug")
    #[arg(long)]
    log_filter: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match &cli.log_filter {
        Some(directive) => EnvFilter::try_new(directive)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("starting othello terminal");

    let mut engine = GameEngine::new();
    let options = ShellOptions {
        hints: !cli.no_hints,
    };

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    shell::run(&mut engine, stdin.lock(), &mut stdout, options)
}
