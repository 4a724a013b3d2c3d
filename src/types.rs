use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// Wire code used in board arrays: 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Self::Black => 1,
            Self::White => 2,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => f.write_str("black"),
            Self::White => f.write_str("white"),
        }
    }
}

/// State of a single board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Color),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn color(self) -> Option<Color> {
        match self {
            Self::Empty => None,
            Self::Occupied(color) => Some(color),
        }
    }

    /// 0=empty, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Occupied(color) => color.code(),
        }
    }
}

/// A board coordinate, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub col: u8,
    pub row: u8,
}

impl Position {
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Cells converted by a move, in direction order then outward along each ray.
pub type FlipSet = Vec<Position>;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "color", rename_all = "lowercase")]
pub enum Outcome {
    Winner(Color),
    Draw,
}

impl Outcome {
    pub fn from_counts(black: usize, white: usize) -> Self {
        if black > white {
            Self::Winner(Color::Black)
        } else if white > black {
            Self::Winner(Color::White)
        } else {
            Self::Draw
        }
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            Self::Winner(color) => Some(color),
            Self::Draw => None,
        }
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub flips: FlipSet,
    pub terminal: bool,
    /// The color that had to pass after this move, if any.
    pub passed: Option<Color>,
    pub winner: Option<Outcome>,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub columns: u8,
    pub rows: u8,
    /// Row-major cells: 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    /// `None` once the game is over.
    pub current_player: Option<Color>,
    pub black_count: usize,
    pub white_count: usize,
    pub is_game_over: bool,
    /// Contract:
    /// - `Some(color)` when `color` had to pass after the previous move.
    /// - `None` otherwise.
    pub passed: Option<Color>,
    /// Cells flipped by the previous move; empty before the first move.
    pub flipped: Vec<Position>,
    pub outcome: Option<Outcome>,
}

/// Reply to `submitMove`. Illegal moves come back with `accepted: false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveReport {
    pub accepted: bool,
    pub flips: FlipSet,
    pub terminal: bool,
    pub passed: Option<Color>,
    pub winner: Option<Outcome>,
    pub error: Option<String>,
}

impl MoveReport {
    pub fn rejected(error: impl fmt::Display) -> Self {
        Self {
            accepted: false,
            flips: Vec::new(),
            terminal: false,
            passed: None,
            winner: None,
            error: Some(error.to_string()),
        }
    }
}

impl From<MoveOutcome> for MoveReport {
    fn from(outcome: MoveOutcome) -> Self {
        Self {
            accepted: true,
            flips: outcome.flips,
            terminal: outcome.terminal,
            passed: outcome.passed,
            winner: outcome.winner,
            error: None,
        }
    }
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub outcome: Outcome,
    pub black_count: usize,
    pub white_count: usize,
}
