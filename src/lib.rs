// Difficulty-scaled minimax opponent over a pluggable rules engine
pub mod board;
pub mod config;
pub mod error;
pub mod perft;
pub mod search;
pub mod selfplay;

pub use board::{GameState, Outcome, DrawReason, PieceKind, Side};
pub use board::cozy::Position;
pub use config::{Difficulty, EngineConfig};
pub use error::{EngineError, Result};
pub use search::policy::{Decision, Engine, MoveSource};
