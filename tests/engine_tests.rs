//! Engine Module Tests
//!
//! Tests for move generation, legality and evaluation, with shakmaty as a
//! reference move generator.

use chess_engine::core::bitboard::Bitboard;
use chess_engine::core::board::{Board, Color, Square};
use chess_engine::engine::eval::{evaluate, is_endgame, QUEEN_VALUE};
use chess_engine::engine::movegen::{
    MoveGen, is_checkmate, is_in_check, is_stalemate, legal_moves, pseudo_legal_moves,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use shakmaty::{CastlingMode, Chess, Position, fen::Fen};

fn from_fen(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

fn reference_position(board: &Board) -> Chess {
    let fen: Fen = board.to_fen().parse().unwrap();
    fen.into_position(CastlingMode::Standard).unwrap()
}

fn sorted_moves(board: &Board) -> Vec<String> {
    let mut moves: Vec<String> = legal_moves(board).iter().map(|mv| mv.to_string().to_lowercase()).collect();
    moves.sort();
    moves
}

fn sorted_reference_moves(pos: &Chess) -> Vec<String> {
    let mut moves: Vec<String> =
        pos.legal_moves().iter().map(|mv| mv.to_uci(CastlingMode::Standard).to_string()).collect();
    moves.sort();
    moves
}

// ============================================================================
// Attack Table Tests
// ============================================================================

#[test]
fn test_pawn_attacks() {
    let white = MoveGen::pawn_attacks(Square::E4, Color::White);
    assert_eq!(white, Bitboard::from_square(Square::D5) | Bitboard::from_square(Square::F5));
    let black = MoveGen::pawn_attacks(Square::A5, Color::Black);
    assert_eq!(black, Bitboard::from_square(Square::B4));
}

#[test]
fn test_bishop_blocked_both_ways() {
    let occupied = Bitboard::from_square(Square::C3) | Bitboard::from_square(Square::G6);
    let attacks = MoveGen::bishop_attacks(Square::E4, occupied);
    assert!(attacks.contains(Square::C3));
    assert!(!attacks.contains(Square::B2));
    assert!(attacks.contains(Square::G6));
    assert!(!attacks.contains(Square::H7));
    assert!(attacks.contains(Square::H1));
    assert!(attacks.contains(Square::A8));
}

// ============================================================================
// Move Generation Tests
// ============================================================================

#[test]
fn test_starting_position_moves() {
    assert_eq!(legal_moves(&Board::startpos()).len(), 20);
    assert_eq!(pseudo_legal_moves(&Board::startpos()).len(), 20);
}

#[test]
fn test_movegen_en_passant() {
    let board = from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");
    let ep: Vec<String> =
        legal_moves(&board).iter().filter(|mv| mv.is_en_passant()).map(|mv| mv.to_string()).collect();
    assert_eq!(ep, vec!["e5d6"]);
}

#[test]
fn test_en_passant_exposing_king_is_illegal() {
    // taking on d6 would open the fifth rank to the rook
    let board = from_fen("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
    assert!(pseudo_legal_moves(&board).iter().any(|mv| mv.is_en_passant()));
    assert!(legal_moves(&board).iter().all(|mv| !mv.is_en_passant()));
}

#[test]
fn test_movegen_castling() {
    let board = from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
    let castles: Vec<String> =
        legal_moves(&board).iter().filter(|mv| mv.is_castling()).map(|mv| mv.to_string()).collect();
    assert_eq!(castles, vec!["e1g1", "e1c1"]);
}

#[test]
fn test_castling_needs_rook_on_origin() {
    // right still set but the h1 rook is gone
    let board = from_fen("4k3/8/8/8/8/8/8/R3K3 w KQ - 0 1");
    let castles: Vec<String> =
        legal_moves(&board).iter().filter(|mv| mv.is_castling()).map(|mv| mv.to_string()).collect();
    assert_eq!(castles, vec!["e1c1"]);
}

#[test]
fn test_queenside_castling_with_attacked_b_file() {
    // b1 may be attacked, only c1 and d1 matter
    let board = from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
    assert!(legal_moves(&board).iter().any(|mv| mv.is_castling()));
}

#[test]
fn test_movegen_promotion() {
    let board = from_fen("8/P7/8/8/8/8/8/4K2k w - - 0 1");
    let promotions: Vec<String> =
        legal_moves(&board).iter().filter(|mv| mv.is_promotion()).map(|mv| mv.to_string()).collect();
    assert_eq!(promotions, vec!["a7a8Q", "a7a8R", "a7a8B", "a7a8N"]);
}

#[test]
fn test_check_states() {
    let board = from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1");
    assert!(is_in_check(&board));
    assert!(!is_checkmate(&board));
    assert!(legal_moves(&board).iter().all(|mv| mv.from() == Square::E1));

    let mate = from_fen("3k4/3Q4/3K4/8/8/8/8/8 b - - 0 1");
    assert!(is_checkmate(&mate));
    assert!(!is_stalemate(&mate));
}

#[test]
fn test_more_moves_than_any_real_game() {
    // twenty-five queens, far beyond the 218 moves a reachable position allows
    let board = from_fen("Q1QQNQ1k/Q6Q/1Q4Q1/Q3Q2Q/Q6Q/Q6Q/Q6Q/KQQQ1QQQ w - - 0 1");
    let pseudo = pseudo_legal_moves(&board);
    let legal = legal_moves(&board);
    assert!(pseudo.len() > 256, "only {} moves", pseudo.len());
    // the black king is too far away to attack anything near a1
    assert_eq!(legal.len(), pseudo.len());
    assert!(!is_checkmate(&board));
    assert!(!is_stalemate(&board));
}

// ============================================================================
// Properties over random playouts
// ============================================================================

#[test]
fn test_legal_moves_never_leave_king_attacked() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let mut board = Board::startpos();
        for _ in 0..80 {
            let moves = legal_moves(&board).to_vec();
            for &mv in &moves {
                let mut child = board.clone();
                child.make_move(mv);
                assert!(!child.is_king_attacked(board.side_to_move()), "{} leaves king attacked", mv);
            }
            let Some(&mv) = moves.choose(&mut rng) else {
                assert_eq!(is_checkmate(&board), is_in_check(&board));
                break;
            };
            board.make_move(mv);
        }
    }
}

#[test]
fn test_matches_reference_generator() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..25 {
        let mut board = Board::startpos();
        for _ in 0..100 {
            let pos = reference_position(&board);
            assert_eq!(sorted_moves(&board), sorted_reference_moves(&pos), "{}", board.to_fen());
            assert_eq!(is_in_check(&board), pos.is_check());

            let moves = legal_moves(&board).to_vec();
            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };
            board.make_move(mv);
        }
    }
}

#[test]
fn test_matches_reference_on_tricky_positions() {
    for fen in [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "8/8/8/K2pP2r/8/8/8/7k w - d6 0 1",
    ] {
        let board = from_fen(fen);
        assert_eq!(sorted_moves(&board), sorted_reference_moves(&reference_position(&board)), "{}", fen);
    }
}

// ============================================================================
// Evaluation Tests
// ============================================================================

#[test]
fn test_eval_startpos() {
    assert_eq!(evaluate(&Board::startpos()), 0);
}

#[test]
fn test_eval_material_advantage() {
    let score = evaluate(&from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"));
    assert_eq!(score, QUEEN_VALUE);
    let score = evaluate(&from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR b KQkq - 0 1"));
    assert_eq!(score, -QUEEN_VALUE);
}

#[test]
fn test_eval_mirrored_positions_cancel() {
    let white = evaluate(&from_fen("4k3/8/8/8/3P4/2N5/8/4K3 w - - 0 1"));
    let black = evaluate(&from_fen("4k3/8/2n5/3p4/8/8/8/4K3 w - - 0 1"));
    assert_eq!(white, -black);
}

#[test]
fn test_endgame_detection() {
    assert!(!is_endgame(&Board::startpos()));
    // six minor and major pieces, no queens
    assert!(is_endgame(&from_fen("r1b1k2r/8/8/8/8/8/8/R1B1K2R w - - 0 1")));
    // six with a queen is still a middlegame
    assert!(!is_endgame(&from_fen("r1b1k2r/8/8/8/8/8/8/R1BQK3 w - - 0 1")));
}
