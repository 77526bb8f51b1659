//! Line-based command protocol
//!
//! Reads one command per line (`move e2e4`, `ai 3`, `fen ...`, `perft 4`) and
//! answers on the output stream with `OK:`/`ERROR:` lines and the board.

pub mod command;
pub mod engine;

pub use command::Command;
pub use engine::{Engine, Flow};
