use anyhow::Context;
use chess_engine::config::{Cli, EngineConfig};
use chess_engine::protocol::Engine;
use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let mut engine = Engine::new(EngineConfig::from(&cli)).context("invalid --fen")?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    engine.run(stdin.lock(), &mut stdout)?;
    Ok(())
}

/// Logs go to stderr so stdout carries only protocol output
fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}
