use crate::config::EngineConfig;
use crate::core::game::{Game, GameStatus};
use crate::engine::eval::evaluate;
use crate::engine::perft::{perft, perft_divide};
use crate::engine::search::Searcher;
use crate::error::Result;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tracing::debug;

use super::command::{self, Command};

/// Whether the read loop should keep going after a command
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Flow {
    Continue,
    Quit,
}

const HELP: &str = "\
Commands:
  move <from><to>[promotion]  play a move, e.g. move e2e4 or move e7e8q
  undo                        take back the last move
  new                         start a new game
  ai <depth>                  let the engine move, searching <depth> plies
  fen <fen>                   load a position
  export                      print the current position as FEN
  eval                        static evaluation, positive favors White
  perft <depth>               count leaf nodes of the move tree
  divide <depth>              perft split by root move
  status                      report checkmate, stalemate or draws
  display                     print the board
  help                        show this message
  quit                        exit";

/// A protocol session: one game, read line by line
pub struct Engine {
    game: Game,
    searcher: Searcher,
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let game = match &config.start_fen {
            Some(fen) => Game::from_fen(fen)?,
            None => Game::new(),
        };
        Ok(Engine { game, searcher: Searcher::new(), config })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Read commands until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        if self.config.show_board {
            self.print_board(out)?;
        }
        out.flush()?;
        for line in input.lines() {
            let line = line?;
            let flow = self.execute(&line, out)?;
            out.flush()?;
            if flow == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Run a single command line
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let Some(command) = command::parse(line) else {
            return Ok(Flow::Continue);
        };
        debug!(?command, "command");

        match command {
            Command::Move(text) => self.cmd_move(text.as_deref(), out)?,
            Command::Undo => self.cmd_undo(out)?,
            Command::New => {
                self.game.reset();
                writeln!(out, "OK: New game started")?;
                self.print_board(out)?;
            }
            Command::Ai(depth) => self.cmd_ai(depth.as_deref(), out)?,
            Command::Fen(fen) => self.cmd_fen(fen.as_deref(), out)?,
            Command::Export => writeln!(out, "FEN: {}", self.game.board().to_fen())?,
            Command::Eval => writeln!(out, "Evaluation: {}", evaluate(self.game.board()))?,
            Command::Perft(depth) => self.cmd_perft(depth.as_deref(), out)?,
            Command::Divide(depth) => self.cmd_divide(depth.as_deref(), out)?,
            Command::Status => match self.game.status() {
                GameStatus::Ongoing => writeln!(out, "STATUS: ongoing")?,
                status => write_status(status, out)?,
            },
            Command::Display => self.print_board(out)?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(word) => {
                debug!(%word, "unknown command");
                writeln!(out, "ERROR: Invalid command")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn cmd_move<W: Write>(&mut self, text: Option<&str>, out: &mut W) -> io::Result<()> {
        let Some(text) = text else {
            return writeln!(out, "ERROR: Invalid move format");
        };
        match self.game.apply_text(text) {
            Ok(mv) => {
                writeln!(out, "OK: {}", mv)?;
                self.print_board(out)?;
                self.report_game_end(out)
            }
            Err(err) => writeln!(out, "ERROR: {}", err),
        }
    }

    fn cmd_undo<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.game.undo().is_none() {
            return writeln!(out, "ERROR: No moves to undo");
        }
        writeln!(out, "OK: undo")?;
        self.print_board(out)
    }

    fn cmd_ai<W: Write>(&mut self, depth: Option<&str>, out: &mut W) -> io::Result<()> {
        let max = self.config.max_ai_depth;
        let Some(depth) = parse_depth(depth, max) else {
            return writeln!(out, "ERROR: AI depth must be 1-{}", max);
        };
        let result = match self.searcher.search(self.game.board(), depth) {
            Ok(result) => result,
            Err(err) => return writeln!(out, "ERROR: {}", err),
        };
        if let Err(err) = self.game.play(result.best_move) {
            return writeln!(out, "ERROR: {}", err);
        }
        writeln!(
            out,
            "AI: {} (depth={}, eval={}, nodes={}, time={}ms)",
            result.best_move,
            depth,
            result.evaluation,
            result.nodes,
            result.elapsed.as_millis()
        )?;
        self.print_board(out)?;
        self.report_game_end(out)
    }

    fn cmd_fen<W: Write>(&mut self, fen: Option<&str>, out: &mut W) -> io::Result<()> {
        let Some(fen) = fen else {
            return writeln!(out, "ERROR: Invalid FEN string");
        };
        match self.game.load_fen(fen) {
            Ok(()) => {
                writeln!(out, "OK: Position loaded from FEN")?;
                self.print_board(out)
            }
            Err(err) => writeln!(out, "ERROR: {}", err),
        }
    }

    fn cmd_perft<W: Write>(&mut self, depth: Option<&str>, out: &mut W) -> io::Result<()> {
        let Some(depth) = parse_depth(depth, self.config.max_perft_depth) else {
            return writeln!(out, "ERROR: Invalid perft depth");
        };
        let start = Instant::now();
        let nodes = perft(self.game.board(), depth);
        writeln!(out, "Perft({}): {} nodes ({}ms)", depth, nodes, start.elapsed().as_millis())
    }

    fn cmd_divide<W: Write>(&mut self, depth: Option<&str>, out: &mut W) -> io::Result<()> {
        let Some(depth) = parse_depth(depth, self.config.max_perft_depth) else {
            return writeln!(out, "ERROR: Invalid perft depth");
        };
        let mut total = 0;
        for (mv, nodes) in perft_divide(self.game.board(), depth) {
            writeln!(out, "{}: {}", mv, nodes)?;
            total += nodes;
        }
        writeln!(out, "Total: {}", total)
    }

    fn print_board<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.config.show_board {
            writeln!(out, "{}", self.game.board())?;
        }
        Ok(())
    }

    fn report_game_end<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.game.status() {
            GameStatus::Ongoing => Ok(()),
            status => write_status(status, out),
        }
    }
}

fn write_status<W: Write>(status: GameStatus, out: &mut W) -> io::Result<()> {
    match status {
        GameStatus::Ongoing => Ok(()),
        GameStatus::Checkmate { winner } => writeln!(out, "CHECKMATE: {} wins", winner),
        GameStatus::Stalemate => writeln!(out, "STALEMATE: Draw"),
        GameStatus::Draw(reason) => writeln!(out, "DRAW: {}", reason),
    }
}

fn parse_depth(text: Option<&str>, max: u32) -> Option<u32> {
    text?.parse::<u32>().ok().filter(|depth| (1..=max).contains(depth))
}
