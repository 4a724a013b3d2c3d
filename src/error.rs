//! Error types for the engine.

use crate::types::Color;

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMoveReason {
    #[error("cell is outside the board")]
    OutOfBounds,
    #[error("cell is already occupied")]
    Occupied,
    #[error("move flips no disks")]
    NoFlips,
}

/// Errors that can occur in engine operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReversiError {
    /// A move was submitted that the rules do not allow. The board is untouched.
    #[error("illegal move at ({col}, {row}): {reason}")]
    InvalidMove {
        col: i32,
        row: i32,
        reason: InvalidMoveReason,
    },

    /// Board geometry or tunables that the engine cannot work with.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("it is not {got}'s turn ({expected} to move)")]
    NotYourTurn { expected: Color, got: Color },

    #[error("game is already over")]
    GameOver,

    /// The selector gave up although `color` still has a legal move.
    #[error("ai could not select a move for {color}")]
    NoAiMove { color: Color },
}

impl ReversiError {
    pub fn invalid_move(col: i32, row: i32, reason: InvalidMoveReason) -> Self {
        Self::InvalidMove { col, row, reason }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, ReversiError>;
