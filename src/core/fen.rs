//! FEN import and export
//!
//! Parsing is strict: every field is validated and the first problem found is
//! reported as a `FenError`. The halfmove and fullmove fields may be omitted
//! and default to 0 and 1.

use super::board::{Board, CastlingRights, Color, Piece, Square};
use crate::error::FenError;

/// Parse a FEN string into a board
pub fn parse(fen: &str) -> Result<Board, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if !(4..=6).contains(&fields.len()) {
        return Err(FenError::FieldCount(fields.len()));
    }

    let mut board = Board::empty();
    parse_placement(fields[0], &mut board)?;

    board.side_to_move = match fields[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::SideToMove(other.to_string())),
    };
    board.castling = parse_castling(fields[2])?;
    board.en_passant = parse_en_passant(fields[3], board.side_to_move)?;

    if let Some(text) = fields.get(4) {
        board.halfmove_clock = text.parse().map_err(|_| FenError::HalfmoveClock(text.to_string()))?;
    }
    if let Some(text) = fields.get(5) {
        board.fullmove_number = text.parse().map_err(|_| FenError::FullmoveNumber(text.to_string()))?;
    }

    Ok(board)
}

fn parse_placement(field: &str, board: &mut Board) -> Result<(), FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (row, text) in ranks.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut files = 0u32;
        for c in text.chars() {
            match c {
                '1'..='8' => files += c as u32 - '0' as u32,
                _ => {
                    let piece = Piece::from_char(c).ok_or(FenError::UnknownPiece(c))?;
                    if files < 8 {
                        board.put_piece(piece, Square::from_file_rank(files as u8, rank));
                    }
                    files += 1;
                }
            }
            if files > 8 {
                return Err(FenError::RankWidth { rank: rank + 1, files });
            }
        }
        if files != 8 {
            return Err(FenError::RankWidth { rank: rank + 1, files });
        }
    }
    Ok(())
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::NONE;
    if field == "-" {
        return Ok(rights);
    }
    let invalid = || FenError::Castling(field.to_string());
    for c in field.chars() {
        let right = match c {
            'K' => CastlingRights::WHITE_KINGSIDE,
            'Q' => CastlingRights::WHITE_QUEENSIDE,
            'k' => CastlingRights::BLACK_KINGSIDE,
            'q' => CastlingRights::BLACK_QUEENSIDE,
            _ => return Err(invalid()),
        };
        if rights.contains(right) {
            return Err(invalid());
        }
        rights.insert(right);
    }
    Ok(rights)
}

/// The target must sit behind a pawn that just moved, so its rank is fixed
/// by the side to move.
fn parse_en_passant(field: &str, side_to_move: Color) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    let expected_rank = match side_to_move {
        Color::White => 5,
        Color::Black => 2,
    };
    match Square::from_algebraic(field) {
        Some(sq) if sq.rank() == expected_rank => Ok(Some(sq)),
        _ => Err(FenError::EnPassant(field.to_string())),
    }
}

/// Six-field FEN for `board`
pub fn export(board: &Board) -> String {
    let mut fen = String::with_capacity(90);

    for rank in (0..8).rev() {
        let mut empty = 0;
        for file in 0..8 {
            match board.piece_at(Square::from_file_rank(file, rank)) {
                Some(piece) => {
                    if empty > 0 {
                        fen.push_str(&empty.to_string());
                        empty = 0;
                    }
                    fen.push(piece.to_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            fen.push_str(&empty.to_string());
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    let side = match board.side_to_move() {
        Color::White => 'w',
        Color::Black => 'b',
    };
    let en_passant = match board.en_passant() {
        Some(sq) => sq.to_algebraic(),
        None => "-".to_string(),
    };
    fen.push_str(&format!(
        " {} {} {} {} {}",
        side,
        board.castling(),
        en_passant,
        board.halfmove_clock(),
        board.fullmove_number()
    ));
    fen
}

impl Board {
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse(fen)
    }

    pub fn to_fen(&self) -> String {
        export(self)
    }
}
