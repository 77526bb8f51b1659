use chess_engine::{Board, perft, perft_divide};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
const POSITION_6: &str = "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";

fn from_fen(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

#[test]
fn test_perft_depth_zero() {
    assert_eq!(perft(&Board::startpos(), 0), 1);
}

#[test]
fn test_perft_startpos_depth_1() {
    assert_eq!(perft(&Board::startpos(), 1), 20);
}

#[test]
fn test_perft_startpos_depth_2() {
    assert_eq!(perft(&Board::startpos(), 2), 400);
}

#[test]
fn test_perft_startpos_depth_3() {
    assert_eq!(perft(&Board::startpos(), 3), 8902);
}

#[test]
fn test_perft_startpos_depth_4() {
    assert_eq!(perft(&Board::startpos(), 4), 197281);
}

#[test]
#[ignore = "slow in debug builds"]
fn test_perft_startpos_depth_5() {
    assert_eq!(perft(&Board::startpos(), 5), 4865609);
}

#[test]
fn test_perft_kiwipete_depth_1() {
    assert_eq!(perft(&from_fen(KIWIPETE), 1), 48);
}

#[test]
fn test_perft_kiwipete_depth_2() {
    assert_eq!(perft(&from_fen(KIWIPETE), 2), 2039);
}

#[test]
fn test_perft_kiwipete_depth_3() {
    assert_eq!(perft(&from_fen(KIWIPETE), 3), 97862);
}

#[test]
#[ignore = "slow in debug builds"]
fn test_perft_kiwipete_depth_4() {
    assert_eq!(perft(&from_fen(KIWIPETE), 4), 4085603);
}

#[test]
fn test_perft_position3() {
    let board = from_fen(POSITION_3);
    assert_eq!(perft(&board, 1), 14);
    assert_eq!(perft(&board, 2), 191);
    assert_eq!(perft(&board, 3), 2812);
    assert_eq!(perft(&board, 4), 43238);
}

#[test]
fn test_perft_position4() {
    let board = from_fen(POSITION_4);
    assert_eq!(perft(&board, 1), 6);
    assert_eq!(perft(&board, 2), 264);
    assert_eq!(perft(&board, 3), 9467);
}

#[test]
fn test_perft_position4_depth_4() {
    assert_eq!(perft(&from_fen(POSITION_4), 4), 422333);
}

#[test]
fn test_perft_position5() {
    let board = from_fen(POSITION_5);
    assert_eq!(perft(&board, 1), 44);
    assert_eq!(perft(&board, 2), 1486);
    assert_eq!(perft(&board, 3), 62379);
}

#[test]
#[ignore = "slow in debug builds"]
fn test_perft_position5_depth_4() {
    assert_eq!(perft(&from_fen(POSITION_5), 4), 2103487);
}

#[test]
fn test_perft_position6() {
    let board = from_fen(POSITION_6);
    assert_eq!(perft(&board, 1), 46);
    assert_eq!(perft(&board, 2), 2079);
    assert_eq!(perft(&board, 3), 89890);
}

#[test]
fn test_divide_kiwipete() {
    let board = from_fen(KIWIPETE);
    let divide = perft_divide(&board, 2);
    assert_eq!(divide.len(), 48);
    assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 2039);

    let names: Vec<String> = divide.iter().map(|(mv, _)| mv.to_string()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert!(names.contains(&"e1g1".to_string()));
    assert!(names.contains(&"e1c1".to_string()));
}

#[test]
fn test_divide_promotion_text() {
    let board = from_fen(POSITION_4);
    let divide = perft_divide(&board, 1);
    let names: Vec<String> = divide.iter().map(|(mv, _)| mv.to_string()).collect();
    assert_eq!(names, vec!["b4c5", "c4c5", "d2d4", "f1f2", "f3d4", "g1h1"]);
}
