//! A game: the current board plus the history needed for undo and draw
//! detection.

use super::board::{Board, Color};
use super::moves::{Move, MoveRequest};
use crate::engine::movegen::{legal_moves, resolve_move};
use crate::error::{ChessError, IllegalMoveReason, Result};
use std::fmt;
use tracing::{debug, info};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DrawReason {
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::ThreefoldRepetition => "threefold repetition",
            DrawReason::InsufficientMaterial => "insufficient material",
        })
    }
}

pub struct Game {
    board: Board,
    /// Boards before each move played, oldest first
    history: Vec<Board>,
    /// Hash of every position reached, the current one last
    hashes: Vec<u64>,
}

impl Game {
    pub fn new() -> Self {
        Self::with_board(Board::startpos())
    }

    pub fn with_board(board: Board) -> Self {
        let hashes = vec![board.zobrist_hash()];
        Game { board, history: Vec::new(), hashes }
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        Ok(Self::with_board(Board::from_fen(fen)?))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of moves that can be undone
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Back to the initial position with an empty history
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Replace the position and clear the history. On error nothing changes.
    pub fn load_fen(&mut self, fen: &str) -> Result<()> {
        let board = Board::from_fen(fen)?;
        info!(fen, "position loaded");
        *self = Self::with_board(board);
        Ok(())
    }

    /// Validate and play a requested move
    pub fn apply_move(&mut self, request: &MoveRequest) -> Result<Move> {
        let mv = resolve_move(&self.board, request).inspect_err(|err| {
            debug!(request = %request, error = %err, "move rejected");
        })?;
        self.push(mv);
        Ok(mv)
    }

    /// Parse coordinate text such as `e2e4` and play it
    pub fn apply_text(&mut self, text: &str) -> Result<Move> {
        let request: MoveRequest = text.parse()?;
        self.apply_move(&request)
    }

    /// Play a move generated for the current position, such as a search result
    pub fn play(&mut self, mv: Move) -> Result<()> {
        if !legal_moves(&self.board).contains(&mv) {
            return Err(ChessError::IllegalMove(IllegalMoveReason::NotLegal));
        }
        self.push(mv);
        Ok(())
    }

    fn push(&mut self, mv: Move) {
        let mut next = self.board.clone();
        next.make_move(mv);
        self.history.push(std::mem::replace(&mut self.board, next));
        self.hashes.push(self.board.zobrist_hash());
    }

    /// Take back the last move, returning the restored board
    pub fn undo(&mut self) -> Option<&Board> {
        let previous = self.history.pop()?;
        self.hashes.pop();
        self.board = previous;
        Some(&self.board)
    }

    /// Times the current position has occurred since the last capture or
    /// pawn move, counting the current occurrence
    pub fn repetition_count(&self) -> usize {
        let Some(&current) = self.hashes.last() else {
            return 0;
        };
        let window = (self.board.halfmove_clock() as usize + 1).min(self.hashes.len());
        self.hashes[self.hashes.len() - window..].iter().filter(|&&hash| hash == current).count()
    }

    /// Checkmate and stalemate take precedence over the draw rules
    pub fn status(&self) -> GameStatus {
        if legal_moves(&self.board).is_empty() {
            return if self.board.is_check() {
                GameStatus::Checkmate { winner: self.board.side_to_move().opposite() }
            } else {
                GameStatus::Stalemate
            };
        }
        if self.board.halfmove_clock() >= 100 {
            GameStatus::Draw(DrawReason::FiftyMoveRule)
        } else if self.repetition_count() >= 3 {
            GameStatus::Draw(DrawReason::ThreefoldRepetition)
        } else if self.board.is_insufficient_material() {
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        } else {
            GameStatus::Ongoing
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
