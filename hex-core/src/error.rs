//! Error types shared by the engine and its drivers

/// Errors produced by board construction, move handling and configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("cell ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("illegal move: cell ({row}, {col}) is already occupied")]
    IllegalMove { row: usize, col: usize },

    #[error("action {action} is outside the action space of a {size}x{size} board")]
    ActionOutOfRange { action: usize, size: usize },

    #[error("game is already over")]
    GameOver,
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, HexError>;
