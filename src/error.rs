//! Error types
//!
//! Every failure is recoverable: an operation that returns an error leaves
//! the board or game it was called on untouched.

use thiserror::Error;

/// Why a FEN string was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 4 to 6 fields, found {0}")]
    FieldCount(usize),

    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} describes {files} files")]
    RankWidth { rank: u8, files: u32 },

    #[error("unknown piece '{0}'")]
    UnknownPiece(char),

    #[error("invalid side to move '{0}'")]
    SideToMove(String),

    #[error("invalid castling field '{0}'")]
    Castling(String),

    #[error("invalid en passant square '{0}'")]
    EnPassant(String),

    #[error("invalid halfmove clock '{0}'")]
    HalfmoveClock(String),

    #[error("invalid fullmove number '{0}'")]
    FullmoveNumber(String),
}

/// Why a well-formed move was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMoveReason {
    #[error("No piece at source square")]
    NoPieceAtSource,

    #[error("Wrong color piece")]
    WrongColor,

    #[error("King would be in check")]
    KingInCheck,

    #[error("Illegal move")]
    NotLegal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("Invalid FEN string: {0}")]
    InvalidFen(#[from] FenError),

    /// Holds the rejected text
    #[error("Invalid move format")]
    InvalidMoveFormat(String),

    #[error("{0}")]
    IllegalMove(#[from] IllegalMoveReason),

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("depth {depth} outside 1..={max}")]
    InvalidDepth { depth: u32, max: u32 },
}

pub type Result<T> = std::result::Result<T, ChessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ChessError::IllegalMove(IllegalMoveReason::KingInCheck).to_string(),
            "King would be in check"
        );
        assert_eq!(ChessError::InvalidMoveFormat("zz".into()).to_string(), "Invalid move format");
        assert_eq!(
            ChessError::from(FenError::RankCount(7)).to_string(),
            "Invalid FEN string: expected 8 ranks, found 7"
        );
    }
}
