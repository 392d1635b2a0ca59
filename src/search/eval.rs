use crate::board::{GameState, PieceKind, Side};

pub type Score = i32;

const PAWN: Score = 100;
const KNIGHT: Score = 320;
const BISHOP: Score = 330;
const ROOK: Score = 500;
const QUEEN: Score = 900;
const KING: Score = 20_000;

// Outside any reachable evaluation (kings plus full material stay below ~41k).
pub const INFINITY: Score = 100_000;
// Mate scoring helper
pub const MATE_SCORE: Score = 50_000;

// Tables are laid out as seen by White: first row is rank 8, last row rank 1.
#[rustfmt::skip]
const PAWN_TABLE: [Score; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [Score; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [Score; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

pub fn piece_value(kind: PieceKind) -> Score {
    match kind {
        PieceKind::Pawn => PAWN,
        PieceKind::Knight => KNIGHT,
        PieceKind::Bishop => BISHOP,
        PieceKind::Rook => ROOK,
        PieceKind::Queen => QUEEN,
        PieceKind::King => KING,
    }
}

fn table_for(kind: PieceKind) -> Option<&'static [Score; 64]> {
    match kind {
        PieceKind::Pawn => Some(&PAWN_TABLE),
        PieceKind::Knight => Some(&KNIGHT_TABLE),
        PieceKind::Bishop => Some(&BISHOP_TABLE),
        PieceKind::Rook | PieceKind::Queen | PieceKind::King => None,
    }
}

/// Vertical flip of a grid index (a8 <-> a1).
pub fn mirror_index(index: usize) -> usize {
    (7 - index / 8) * 8 + index % 8
}

/// Placement bonus for a piece on `index`; zero for pieces without a table.
pub fn positional_bonus(kind: PieceKind, side: Side, index: usize) -> Score {
    let Some(table) = table_for(kind) else { return 0 };
    let idx = match side { Side::First => index, Side::Second => mirror_index(index) };
    table.get(idx).copied().unwrap_or(0)
}

/// Material plus placement, positive when White is ahead.
pub fn evaluate<P: GameState + ?Sized>(pos: &P) -> Score {
    pos.occupied_squares()
        .iter()
        .enumerate()
        .filter_map(|(idx, sq)| sq.map(|(kind, side)| side.sign() * (piece_value(kind) + positional_bonus(kind, side, idx))))
        .sum()
}

// Side-agnostic material in centipawns: positive means White has more material.
pub fn material<P: GameState + ?Sized>(pos: &P) -> Score {
    pos.occupied_squares()
        .iter()
        .flatten()
        .map(|&(kind, side)| side.sign() * piece_value(kind))
        .sum()
}

/// Score of a checkmate for `perspective`. Mates found with more depth left
/// (i.e. sooner) score further from zero.
pub fn mate_score(winner: Side, perspective: Side, depth_left: u32) -> Score {
    let mate = MATE_SCORE + depth_left as Score;
    if winner == perspective { mate } else { -mate }
}
