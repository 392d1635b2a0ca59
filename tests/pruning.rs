use chess_ai::search::alphabeta::{search_root, SearchParams, Searcher};
use chess_ai::search::eval::INFINITY;
use chess_ai::{GameState, Position};
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::SeedableRng;

const CASES: &[(&str, u32)] = &[
    ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 3),
    ("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 5 4", 2),
    ("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", 2),
    ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 3),
    ("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 3),
];

#[test]
fn pruning_keeps_root_choice_and_score() {
    for &(fen, depth) in CASES {
        for seed in [1u64, 2, 3] {
            let mut pos = Position::from_fen(fen).unwrap();
            let pruned = search_root(&mut pos, SearchParams { depth, prune: true }, &mut SmallRng::seed_from_u64(seed)).unwrap();
            let full = search_root(&mut pos, SearchParams { depth, prune: false }, &mut SmallRng::seed_from_u64(seed)).unwrap();
            assert_eq!(pruned.bestmove, full.bestmove, "{fen} seed {seed}");
            assert_eq!(pruned.score_cp, full.score_cp, "{fen} seed {seed}");
            assert!(pruned.nodes <= full.nodes, "{fen}: pruned {} > full {}", pruned.nodes, full.nodes);
        }
    }
}

#[test]
fn pruning_cuts_nodes_in_the_opening() {
    let mut pos = Position::startpos();
    let pruned = search_root(&mut pos, SearchParams { depth: 3, prune: true }, &mut SmallRng::seed_from_u64(8)).unwrap();
    let full = search_root(&mut pos, SearchParams { depth: 3, prune: false }, &mut SmallRng::seed_from_u64(8)).unwrap();
    // every interior node and leaf is visited without cutoffs
    assert_eq!(full.nodes, 20 + 400 + 8902);
    assert!(pruned.nodes < full.nodes);
}

#[test]
fn inner_values_match_for_both_layers() {
    for &(fen, depth) in CASES {
        let mut pos = Position::from_fen(fen).unwrap();
        let side = pos.side_to_move();
        for maximizing in [true, false] {
            let a = Searcher::new(side).minimax(&mut pos, depth, -INFINITY, INFINITY, maximizing).unwrap();
            let b = Searcher::new(side).with_pruning(false).minimax(&mut pos, depth, -INFINITY, INFINITY, maximizing).unwrap();
            assert_eq!(a, b, "{fen} maximizing={maximizing}");
        }
    }
}
