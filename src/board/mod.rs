pub mod cozy;

use std::fmt;
use crate::error::Result;

/// The two players. `First` moves first (white), `Second` replies (black).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// +1 for the first mover, -1 for the second; evaluation scores are
    /// always from the first mover's point of view.
    pub fn sign(self) -> i32 {
        match self { Side::First => 1, Side::Second => -1 }
    }

    pub fn opponent(self) -> Side {
        match self { Side::First => Side::Second, Side::Second => Side::First }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Side::First => write!(f, "White"), Side::Second => write!(f, "Black") }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Single-letter symbol, uppercase for the first mover.
    pub fn symbol(self, side: Side) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        if side == Side::First { c.to_ascii_uppercase() } else { c }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
    Repetition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Side },
    Draw(DrawReason),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            Outcome::Draw(DrawReason::Stalemate) => write!(f, "draw by stalemate"),
            Outcome::Draw(DrawReason::FiftyMoveRule) => write!(f, "draw by fifty-move rule"),
            Outcome::Draw(DrawReason::InsufficientMaterial) => write!(f, "draw by insufficient material"),
            Outcome::Draw(DrawReason::Repetition) => write!(f, "draw by threefold repetition"),
        }
    }
}

/// 64 squares in grid order: index 0 is a8, index 63 is h1.
pub type Grid = [Option<(PieceKind, Side)>; 64];

/// Row-major grid index for a (file, rank) pair, both 0-based from a1.
pub fn grid_index(file: usize, rank: usize) -> usize {
    (7 - rank) * 8 + file
}

/// Rules-engine surface consumed by the evaluator and the search.
///
/// Implementations mutate in place on `apply` and must restore the exact prior
/// state on `undo`.
pub trait GameState {
    type Move: Copy + Eq + fmt::Display + fmt::Debug;

    fn side_to_move(&self) -> Side;
    fn legal_moves(&self) -> Vec<Self::Move>;
    fn apply(&mut self, mv: Self::Move) -> Result<()>;
    /// Takes back the most recently applied move, `None` if there is none.
    fn undo(&mut self) -> Option<Self::Move>;
    fn outcome(&self) -> Option<Outcome>;
    fn occupied_squares(&self) -> Grid;

    fn is_game_over(&self) -> bool { self.outcome().is_some() }

    /// Plays `mv`, runs `f` on the resulting position and takes the move back
    /// before returning, whatever `f` returned.
    fn with_move<R>(&mut self, mv: Self::Move, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R>
    where
        Self: Sized,
    {
        self.apply(mv)?;
        let out = f(self);
        self.undo();
        out
    }
}
