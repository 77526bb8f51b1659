//! Runtime configuration
//!
//! `Cli` is the command-line surface of the `chess` binary; `EngineConfig` is
//! what the protocol engine actually consumes, so library users can build one
//! without going through clap.

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "chess", version, about = "Chess engine speaking a line-based command protocol")]
pub struct Cli {
    /// Log filter for stderr, e.g. `debug` or `chess_engine=trace`. Falls back
    /// to RUST_LOG, then `warn`.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Deepest search the `ai` command accepts
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=64))]
    pub max_ai_depth: u32,

    /// Deepest tree the `perft` and `divide` commands accept
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_perft_depth: u32,

    /// Start from this position instead of the initial one
    #[arg(long)]
    pub fen: Option<String>,

    /// Do not print the board after commands
    #[arg(long)]
    pub no_board: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub max_ai_depth: u32,
    pub max_perft_depth: u32,
    pub start_fen: Option<String>,
    pub show_board: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { max_ai_depth: 5, max_perft_depth: 6, start_fen: None, show_board: true }
    }
}

impl From<&Cli> for EngineConfig {
    fn from(cli: &Cli) -> Self {
        EngineConfig {
            max_ai_depth: cli.max_ai_depth,
            max_perft_depth: cli.max_perft_depth,
            start_fen: cli.fen.clone(),
            show_board: !cli.no_board,
        }
    }
}
