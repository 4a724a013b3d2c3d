use rand::rngs::SmallRng;
use tracing::debug;

use crate::ai::{MoveSelector, random_move, seeded_rng};
use crate::board::Board;
use crate::rules::legal_moves;
use crate::types::{Color, Position};

/// Takes a corner whenever one is playable, otherwise plays a random legal move.
pub struct HeuristicSelector {
    rng: SmallRng,
}

impl HeuristicSelector {
    pub const NAME: &'static str = "heuristic";

    /// Wall-clock seeded.
    pub fn new() -> Self {
        Self::with_rng(seeded_rng(None))
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(seeded_rng(Some(seed)))
    }

    pub fn with_rng(rng: SmallRng) -> Self {
        Self { rng }
    }
}

impl Default for HeuristicSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for HeuristicSelector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn select_move(&mut self, board: &Board, color: Color) -> Option<Position> {
        let moves = legal_moves(board, color);

        // First corner in scan order wins outright.
        if let Some(&corner) = moves.iter().find(|&&pos| board.is_corner(pos)) {
            debug!(%color, %corner, "heuristic takes corner");
            return Some(corner);
        }

        let choice = random_move(&mut self.rng, &moves);
        debug!(%color, candidates = moves.len(), ?choice, "heuristic random move");
        choice
    }
}
