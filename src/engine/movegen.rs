//! Move generation
//!
//! Attack sets come from tables built once per process:
//! - knight, king and pawn attacks per square
//! - one ray per direction per square for the sliders; the first blocker on a
//!   ray is its lowest bit for directions that increase the square index and
//!   its highest bit otherwise
//!
//! Generation is pseudo-legal first, then filtered by playing each move on a
//! scratch copy and rejecting those that leave the mover's king attacked.

use crate::core::bitboard::Bitboard;
use crate::core::board::{Board, CastlingRights, Color, Piece, PieceType, Square};
use crate::core::moves::{Move, MoveList, MoveRequest};
use crate::error::{ChessError, IllegalMoveReason, Result};
use std::sync::OnceLock;

/// (file delta, rank delta): N, NE, E, SE, S, SW, W, NW
const DIRECTIONS: [(i8, i8); 8] = [(0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1)];
const ROOK_DIRECTIONS: [usize; 4] = [0, 2, 4, 6];
const BISHOP_DIRECTIONS: [usize; 4] = [1, 3, 5, 7];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];

/// Precomputed attack tables
pub struct MoveGen {
    knight_attacks: [Bitboard; 64],
    king_attacks: [Bitboard; 64],
    /// [color][square]
    pawn_attacks: [[Bitboard; 64]; 2],
    /// [direction][square], excluding the square itself
    rays: [[Bitboard; 64]; 8],
}

static MOVEGEN: OnceLock<MoveGen> = OnceLock::new();

impl MoveGen {
    pub fn instance() -> &'static MoveGen {
        MOVEGEN.get_or_init(MoveGen::init)
    }

    fn init() -> Self {
        let mut mg = MoveGen {
            knight_attacks: [Bitboard::EMPTY; 64],
            king_attacks: [Bitboard::EMPTY; 64],
            pawn_attacks: [[Bitboard::EMPTY; 64]; 2],
            rays: [[Bitboard::EMPTY; 64]; 8],
        };
        mg.init_knight_attacks();
        mg.init_king_attacks();
        mg.init_pawn_attacks();
        mg.init_rays();
        mg
    }

    fn init_knight_attacks(&mut self) {
        for index in 0..64u8 {
            let sq = Square(index);
            let mut attacks = Bitboard::EMPTY;
            for (df, dr) in KNIGHT_OFFSETS {
                if let Some(to) = sq.offset(df, dr) {
                    attacks.set(to);
                }
            }
            self.knight_attacks[sq.index()] = attacks;
        }
    }

    fn init_king_attacks(&mut self) {
        for index in 0..64u8 {
            let bb = Bitboard::from_square(Square(index));
            self.king_attacks[index as usize] = bb.north()
                | bb.south()
                | bb.east()
                | bb.west()
                | bb.north_east()
                | bb.north_west()
                | bb.south_east()
                | bb.south_west();
        }
    }

    fn init_pawn_attacks(&mut self) {
        for index in 0..64u8 {
            let bb = Bitboard::from_square(Square(index));
            self.pawn_attacks[Color::White.index()][index as usize] = bb.north_east() | bb.north_west();
            self.pawn_attacks[Color::Black.index()][index as usize] = bb.south_east() | bb.south_west();
        }
    }

    fn init_rays(&mut self) {
        for (dir, &(df, dr)) in DIRECTIONS.iter().enumerate() {
            for index in 0..64u8 {
                let mut ray = Bitboard::EMPTY;
                let mut current = Square(index).offset(df, dr);
                while let Some(sq) = current {
                    ray.set(sq);
                    current = sq.offset(df, dr);
                }
                self.rays[dir][index as usize] = ray;
            }
        }
    }

    #[inline]
    pub fn knight_attacks(sq: Square) -> Bitboard {
        Self::instance().knight_attacks[sq.index()]
    }

    #[inline]
    pub fn king_attacks(sq: Square) -> Bitboard {
        Self::instance().king_attacks[sq.index()]
    }

    /// Squares a pawn of `color` on `sq` attacks
    #[inline]
    pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
        Self::instance().pawn_attacks[color.index()][sq.index()]
    }

    /// Attacks along one ray, stopping at and including the first occupied square
    fn ray_attacks(&self, dir: usize, sq: Square, occupied: Bitboard) -> Bitboard {
        let ray = self.rays[dir][sq.index()];
        let blockers = ray & occupied;
        if blockers.is_empty() {
            return ray;
        }
        // N, NE, E and NW step to higher indices
        let ascending = matches!(dir, 0 | 1 | 2 | 7);
        let blocker = if ascending { blockers.lsb() } else { blockers.msb() };
        ray ^ self.rays[dir][blocker.index()]
    }

    pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
        let mg = Self::instance();
        ROOK_DIRECTIONS
            .iter()
            .fold(Bitboard::EMPTY, |acc, &dir| acc | mg.ray_attacks(dir, sq, occupied))
    }

    pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
        let mg = Self::instance();
        BISHOP_DIRECTIONS
            .iter()
            .fold(Bitboard::EMPTY, |acc, &dir| acc | mg.ray_attacks(dir, sq, occupied))
    }

    #[inline]
    pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
        Self::rook_attacks(sq, occupied) | Self::bishop_attacks(sq, occupied)
    }

    /// Attack set of `piece` standing on `sq`
    pub fn attacks_of(piece: Piece, sq: Square, occupied: Bitboard) -> Bitboard {
        match piece.piece_type {
            PieceType::Pawn => Self::pawn_attacks(sq, piece.color),
            PieceType::Knight => Self::knight_attacks(sq),
            PieceType::Bishop => Self::bishop_attacks(sq, occupied),
            PieceType::Rook => Self::rook_attacks(sq, occupied),
            PieceType::Queen => Self::queen_attacks(sq, occupied),
            PieceType::King => Self::king_attacks(sq),
        }
    }
}

/// Every move obeying piece movement rules, whether or not it exposes the
/// mover's king. Order: pawns, knights, bishops, rooks, queens, king, castling;
/// origin squares ascending within each piece type.
pub fn pseudo_legal_moves(board: &Board) -> MoveList {
    let mut moves = MoveList::new();
    generate_pawn_moves(board, &mut moves);
    for piece_type in [PieceType::Knight, PieceType::Bishop, PieceType::Rook, PieceType::Queen, PieceType::King] {
        generate_piece_moves(board, piece_type, &mut moves);
    }
    generate_castling_moves(board, &mut moves);
    moves
}

/// Moves of the side to move that do not leave its own king attacked
pub fn legal_moves(board: &Board) -> MoveList {
    let mut moves = pseudo_legal_moves(board);
    moves.retain(|&mv| is_safe(board, mv));
    moves
}

/// Whether playing `mv` keeps the mover's king out of attack
fn is_safe(board: &Board, mv: Move) -> bool {
    let us = board.side_to_move();
    let mut scratch = board.clone();
    scratch.make_move(mv);
    !scratch.is_king_attacked(us)
}

fn generate_pawn_moves(board: &Board, moves: &mut MoveList) {
    let us = board.side_to_move();
    let them = us.opposite();
    let enemies = board.color(them);

    for from in board.pieces_of(PieceType::Pawn, us) {
        if let Some(one) = from.offset(0, us.forward()) {
            if board.piece_at(one).is_none() {
                push_pawn_move(moves, us, from, one, false);
                if from.rank() == us.pawn_start_rank() {
                    if let Some(two) = one.offset(0, us.forward()) {
                        if board.piece_at(two).is_none() {
                            moves.push(Move::double_push(from, two));
                        }
                    }
                }
            }
        }

        let attacks = MoveGen::pawn_attacks(from, us);
        for to in attacks & enemies {
            push_pawn_move(moves, us, from, to, true);
        }

        if let Some(ep) = board.en_passant() {
            // the pawn being taken sits beside us on the target's file
            let victim = Square::from_file_rank(ep.file(), from.rank());
            if attacks.contains(ep) && board.piece_at(victim) == Some(Piece::new(PieceType::Pawn, them)) {
                moves.push(Move::en_passant(from, ep));
            }
        }
    }
}

fn push_pawn_move(moves: &mut MoveList, us: Color, from: Square, to: Square, is_capture: bool) {
    if to.rank() == us.promotion_rank() {
        for piece in PieceType::PROMOTIONS {
            moves.push(Move::promotion(from, to, piece, is_capture));
        }
    } else if is_capture {
        moves.push(Move::capture(from, to));
    } else {
        moves.push(Move::quiet(from, to));
    }
}

fn generate_piece_moves(board: &Board, piece_type: PieceType, moves: &mut MoveList) {
    let us = board.side_to_move();
    let own = board.color(us);
    let enemies = board.color(us.opposite());
    let occupied = board.occupied();

    for from in board.pieces_of(piece_type, us) {
        let targets = MoveGen::attacks_of(Piece::new(piece_type, us), from, occupied) & !own;
        for to in targets {
            if enemies.contains(to) {
                moves.push(Move::capture(from, to));
            } else {
                moves.push(Move::quiet(from, to));
            }
        }
    }
}

fn generate_castling_moves(board: &Board, moves: &mut MoveList) {
    let us = board.side_to_move();
    let them = us.opposite();
    let back = us.back_rank();
    let home = Square::from_file_rank(4, back);
    if board.king_square(us) != Some(home) || board.is_attacked(home, them) {
        return;
    }

    let rook = Some(Piece::new(PieceType::Rook, us));
    let options: [(_, u8, u8, &[u8]); 2] = [
        (CastlingRights::kingside(us), 7, 6, &[5, 6]),
        (CastlingRights::queenside(us), 0, 2, &[1, 2, 3]),
    ];
    for (right, rook_file, king_file, between) in options {
        if !board.castling().contains(right) || board.piece_at(Square::from_file_rank(rook_file, back)) != rook {
            continue;
        }
        if between.iter().any(|&file| board.piece_at(Square::from_file_rank(file, back)).is_some()) {
            continue;
        }
        // the king crosses the square next to it and lands two files over
        let crossing = Square::from_file_rank((4 + king_file) / 2, back);
        let target = Square::from_file_rank(king_file, back);
        if board.is_attacked(crossing, them) || board.is_attacked(target, them) {
            continue;
        }
        moves.push(Move::castle(home, target));
    }
}

pub fn is_in_check(board: &Board) -> bool {
    board.is_check()
}

/// In check with no legal move
pub fn is_checkmate(board: &Board) -> bool {
    board.is_check() && legal_moves(board).is_empty()
}

/// Not in check, yet no legal move
pub fn is_stalemate(board: &Board) -> bool {
    !board.is_check() && legal_moves(board).is_empty()
}

/// Find the legal move a request names, or explain why there is none.
///
/// Checks run in order: terminal position, empty source square, wrong color,
/// move that would expose the king, anything else.
pub fn resolve_move(board: &Board, request: &MoveRequest) -> Result<Move> {
    let legal = legal_moves(board);
    if legal.is_empty() {
        return Err(ChessError::NoLegalMoves);
    }
    let piece = board
        .piece_at(request.from)
        .ok_or(ChessError::IllegalMove(IllegalMoveReason::NoPieceAtSource))?;
    if piece.color != board.side_to_move() {
        return Err(IllegalMoveReason::WrongColor.into());
    }
    if let Some(mv) = legal.iter().find(|mv| request.matches(mv)) {
        return Ok(*mv);
    }
    if pseudo_legal_moves(board).iter().any(|mv| request.matches(mv)) {
        Err(IllegalMoveReason::KingInCheck.into())
    } else {
        Err(IllegalMoveReason::NotLegal.into())
    }
}

/// Validate `request` against `board` and return the resulting position.
/// `board` is never modified.
pub fn apply_move(board: &Board, request: &MoveRequest) -> Result<Board> {
    let mv = resolve_move(board, request)?;
    let mut next = board.clone();
    next.make_move(mv);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn test_knight_attacks() {
        assert_eq!(MoveGen::knight_attacks(Square::E4).count(), 8);
        assert_eq!(MoveGen::knight_attacks(Square::A1).count(), 2);
        assert_eq!(MoveGen::knight_attacks(Square::H8).count(), 2);
    }

    #[test]
    fn test_king_attacks() {
        assert_eq!(MoveGen::king_attacks(Square::E4).count(), 8);
        assert_eq!(MoveGen::king_attacks(Square::A1).count(), 3);
    }

    #[test]
    fn test_slider_attacks_empty_board() {
        assert_eq!(MoveGen::rook_attacks(Square::E4, Bitboard::EMPTY).count(), 14);
        assert_eq!(MoveGen::bishop_attacks(Square::E4, Bitboard::EMPTY).count(), 13);
        assert_eq!(MoveGen::queen_attacks(Square::A1, Bitboard::EMPTY).count(), 21);
    }

    #[test]
    fn test_slider_stops_at_blocker() {
        let blockers = Bitboard::from_square(Square::E6) | Bitboard::from_square(Square::C4);
        let attacks = MoveGen::rook_attacks(Square::E4, blockers);
        assert!(attacks.contains(Square::E5));
        assert!(attacks.contains(Square::E6));
        assert!(!attacks.contains(Square::E7));
        assert!(attacks.contains(Square::C4));
        assert!(!attacks.contains(Square::B4));
        assert!(attacks.contains(Square::E1));
        assert_eq!(attacks.count(), 2 + 2 + 3 + 3);
    }

    #[test]
    fn test_startpos_moves() {
        let moves = legal_moves(&Board::startpos());
        assert_eq!(moves.len(), 20);
        assert_eq!(moves[0].to_string(), "a2a3");
        assert_eq!(moves[1].to_string(), "a2a4");
    }

    #[test]
    fn test_en_passant() {
        let b = board("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");
        let ep: Vec<Move> = legal_moves(&b).iter().copied().filter(|mv| mv.is_en_passant()).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to_string(), "e5d6");
    }

    #[test]
    fn test_castling_both_sides() {
        let b = board("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        let castles = legal_moves(&b).iter().filter(|mv| mv.is_castling()).count();
        assert_eq!(castles, 2);
    }

    #[test]
    fn test_no_castling_through_attack() {
        // black rook on f8 covers f1
        let b = board("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let castles: Vec<String> =
            legal_moves(&b).iter().filter(|mv| mv.is_castling()).map(|mv| mv.to_string()).collect();
        assert_eq!(castles, vec!["e1c1"]);
    }

    #[test]
    fn test_no_castling_out_of_check() {
        let b = board("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1");
        assert!(legal_moves(&b).iter().all(|mv| !mv.is_castling()));
    }

    #[test]
    fn test_promotions_without_kings() {
        let b = board("8/P7/8/8/8/8/8/8 w - - 0 1");
        let moves = legal_moves(&b);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|mv| mv.is_promotion()));
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        let b = board("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(legal_moves(&b).iter().all(|mv| mv.from() != Square::E2));
    }

    #[test]
    fn test_mate_and_stalemate() {
        let mate = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(is_in_check(&mate));
        assert!(is_checkmate(&mate));
        assert!(!is_stalemate(&mate));

        let stale = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!is_in_check(&stale));
        assert!(is_stalemate(&stale));
        assert!(!is_checkmate(&stale));
    }

    #[test]
    fn test_resolve_errors_in_order() {
        let start = Board::startpos();
        let req = |text: &str| text.parse::<MoveRequest>().unwrap();
        assert_eq!(
            resolve_move(&start, &req("e3e4")),
            Err(ChessError::IllegalMove(IllegalMoveReason::NoPieceAtSource))
        );
        assert_eq!(
            resolve_move(&start, &req("e7e5")),
            Err(ChessError::IllegalMove(IllegalMoveReason::WrongColor))
        );
        assert_eq!(resolve_move(&start, &req("e2e5")), Err(ChessError::IllegalMove(IllegalMoveReason::NotLegal)));

        let pinned = board("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1");
        assert_eq!(
            resolve_move(&pinned, &req("e2c3")),
            Err(ChessError::IllegalMove(IllegalMoveReason::KingInCheck))
        );

        let mate = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert_eq!(resolve_move(&mate, &req("e2e3")), Err(ChessError::NoLegalMoves));
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let start = Board::startpos();
        let req: MoveRequest = "e2e4".parse().unwrap();
        let next = apply_move(&start, &req).unwrap();
        assert_eq!(start, Board::startpos());
        assert_eq!(next.en_passant(), Some(Square::E3));
        assert_eq!(next.side_to_move(), Color::Black);
    }
}
