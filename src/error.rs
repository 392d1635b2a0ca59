use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("FEN error: {0}")]
    Fen(String),
    #[error("Illegal move: {0}")]
    IllegalMove(String),
    #[error("Invalid difficulty: {0} (expected 1-3 or easy/medium/hard)")]
    InvalidDifficulty(String),
    #[error("Invalid config: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
