//! Computer opponents.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use web_time::SystemTime;

use crate::board::Board;
use crate::config::{GameConfig, StrategyKind};
use crate::types::{Color, Position};

pub mod experience;
pub mod heuristic;
pub mod reward;

pub use experience::{Decision, ExperienceSelector, RewardRecord, RewardTable};
pub use heuristic::HeuristicSelector;

/// Chooses a move for `color` on a read-only board.
///
/// Contract: returns only positions where `rules::is_legal` holds,
/// and `None` exactly when `color` has no legal move.
pub trait MoveSelector: Send {
    fn name(&self) -> &'static str;

    fn select_move(&mut self, board: &Board, color: Color) -> Option<Position>;
}

/// Builds the selector named by `config.strategy`.
pub fn build_selector(config: &GameConfig) -> Box<dyn MoveSelector> {
    let rng = seeded_rng(config.seed);
    match config.strategy {
        StrategyKind::Heuristic => Box::new(HeuristicSelector::with_rng(rng)),
        StrategyKind::Experience => Box::new(ExperienceSelector::with_table(
            RewardTable::new(),
            config.experience,
            rng,
        )),
    }
}

/// Deterministic RNG for `Some(seed)`, wall-clock seeded otherwise.
pub fn seeded_rng(seed: Option<u64>) -> SmallRng {
    SmallRng::seed_from_u64(seed.unwrap_or_else(clock_seed))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

pub(crate) fn random_move(rng: &mut SmallRng, moves: &[Position]) -> Option<Position> {
    moves.choose(rng).copied()
}
