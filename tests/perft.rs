use chess_ai::perft::{divide, perft};
use chess_ai::Position;

#[test]
fn perft_startpos_small_depths() {
    let mut p = Position::startpos();
    assert_eq!(perft(&mut p, 1).unwrap(), 20);
    assert_eq!(perft(&mut p, 2).unwrap(), 400);
    assert_eq!(perft(&mut p, 3).unwrap(), 8902);
    assert_eq!(p.ply(), 0);
}

#[test]
fn perft_kiwipete() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut p = Position::from_fen(fen).unwrap();
    assert_eq!(perft(&mut p, 1).unwrap(), 48);
    assert_eq!(perft(&mut p, 2).unwrap(), 2039);
    assert_eq!(p.fen(), Position::from_fen(fen).unwrap().fen());
}

#[test]
fn divide_sums_to_perft() {
    let mut p = Position::startpos();
    let parts = divide(&mut p, 2).unwrap();
    assert_eq!(parts.len(), 20);
    assert!(parts.iter().all(|(_, n)| *n == 20));
    assert_eq!(parts.iter().map(|(_, n)| n).sum::<u64>(), 400);
}
