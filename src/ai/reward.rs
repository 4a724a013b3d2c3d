//! Board statistics and the reward signal used by the experience strategy.

use crate::board::Board;
use crate::config::RewardWeights;
use crate::types::Color;

/// Disk counts of one color on a board snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardStats {
    pub total: usize,
    /// Disks on the outer ring, corners counted once.
    pub edges: usize,
    pub corners: usize,
}

pub fn stats(board: &Board, color: Color) -> BoardStats {
    board
        .positions()
        .filter(|&pos| board.cell(pos).color() == Some(color))
        .fold(BoardStats::default(), |mut acc, pos| {
            acc.total += 1;
            if board.is_edge(pos) {
                acc.edges += 1;
            }
            if board.is_corner(pos) {
                acc.corners += 1;
            }
            acc
        })
}

/// Weighted absolute change in corners, edges and total disks for `color`.
pub fn reward(before: &BoardStats, after: &BoardStats, weights: &RewardWeights) -> f32 {
    let corners = before.corners.abs_diff(after.corners) as f32;
    let edges = before.edges.abs_diff(after.edges) as f32;
    let total = before.total.abs_diff(after.total) as f32;

    corners * weights.corner + edges * weights.edge + total / weights.total_divisor
}
