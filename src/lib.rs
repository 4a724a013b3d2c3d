use wasm_bindgen::prelude::*;

pub mod ai;
pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod hash;
pub mod rules;
pub mod types;

pub use board::Board;
pub use config::{ExperienceConfig, GameConfig, RewardWeights, StrategyKind};
pub use error::{InvalidMoveReason, Result, ReversiError};
pub use game::{GameInstance, TurnState, new_game};
pub use types::{Cell, Color, FlipSet, MoveOutcome, Outcome, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
