//! Experience strategy: remembers the reward each move earned from a given
//! position and replays the best one, exploring when the memory looks poor.

use std::collections::HashMap;

use rand::Rng;
use rand::rngs::SmallRng;
use tracing::{debug, warn};
use web_time::Instant;

use crate::ai::reward::{reward, stats};
use crate::ai::{MoveSelector, random_move, seeded_rng};
use crate::board::Board;
use crate::config::{ExperienceConfig, MAX_LOOKAHEAD_DEPTH};
use crate::hash::{BoardKey, hash};
use crate::rules::{apply_move, legal_moves};
use crate::types::{Color, Position};

/// One remembered outcome of playing `position` from some state.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardRecord {
    pub position: Position,
    pub reward: f32,
    /// Key of the board right after the move.
    pub successor: BoardKey,
}

/// Learned memory keyed by board state, scoped per color.
///
/// Grows without bound; callers decide when to `clear` or drop it.
#[derive(Debug, Clone, Default)]
pub struct RewardTable {
    black: HashMap<BoardKey, Vec<RewardRecord>>,
    white: HashMap<BoardKey, Vec<RewardRecord>>,
}

impl RewardTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record unless `(state, color, position)` is already known.
    /// Returns whether it was inserted.
    pub fn record(
        &mut self,
        state: BoardKey,
        color: Color,
        position: Position,
        reward: f32,
        successor: BoardKey,
    ) -> bool {
        let records = self.side_mut(color).entry(state).or_default();
        if records.iter().any(|record| record.position == position) {
            return false;
        }
        records.push(RewardRecord {
            position,
            reward,
            successor,
        });
        true
    }

    /// Records for `state`, in insertion order.
    pub fn entries(&self, state: &BoardKey, color: Color) -> &[RewardRecord] {
        self.side(color)
            .get(state)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.black.values().chain(self.white.values()).map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct `(state, color)` pairs.
    pub fn state_count(&self) -> usize {
        self.black.len() + self.white.len()
    }

    pub fn clear(&mut self) {
        self.black.clear();
        self.white.clear();
    }

    fn side(&self, color: Color) -> &HashMap<BoardKey, Vec<RewardRecord>> {
        match color {
            Color::Black => &self.black,
            Color::White => &self.white,
        }
    }

    fn side_mut(&mut self, color: Color) -> &mut HashMap<BoardKey, Vec<RewardRecord>> {
        match color {
            Color::Black => &mut self.black,
            Color::White => &mut self.white,
        }
    }
}

/// How the last move was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Best remembered move.
    Table,
    /// Remembered moves were weak; a random move was tried instead.
    Exploration,
    /// Nothing remembered for this state.
    Random,
    NoMove,
}

pub struct ExperienceSelector {
    table: RewardTable,
    config: ExperienceConfig,
    rng: SmallRng,
    last_decision: Option<Decision>,
}

impl ExperienceSelector {
    pub const NAME: &'static str = "experience";

    /// Empty memory, wall-clock seeded.
    pub fn new(config: ExperienceConfig) -> Self {
        Self::with_table(RewardTable::new(), config, seeded_rng(None))
    }

    pub fn seeded(config: ExperienceConfig, seed: u64) -> Self {
        Self::with_table(RewardTable::new(), config, seeded_rng(Some(seed)))
    }

    /// Continues learning on top of an existing table.
    pub fn with_table(table: RewardTable, config: ExperienceConfig, rng: SmallRng) -> Self {
        Self {
            table,
            config,
            rng,
            last_decision: None,
        }
    }

    pub fn table(&self) -> &RewardTable {
        &self.table
    }

    pub fn into_table(self) -> RewardTable {
        self.table
    }

    pub fn config(&self) -> &ExperienceConfig {
        &self.config
    }

    pub fn last_decision(&self) -> Option<Decision> {
        self.last_decision
    }

    /// Highest-valued remembered move among `legal`; ties go to the earliest record.
    fn best_recorded(
        &self,
        state: &BoardKey,
        color: Color,
        legal: &[Position],
    ) -> Option<(Position, f32)> {
        let depth = self.config.lookahead_depth.min(MAX_LOOKAHEAD_DEPTH);
        let mut best: Option<(Position, f32)> = None;
        for record in self.table.entries(state, color) {
            if !legal.contains(&record.position) {
                continue;
            }
            let value = self.value(record, color, depth);
            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((record.position, value));
            }
        }
        best
    }

    /// Reward of `record`, less the best remembered reply up to `depth` plies deep.
    fn value(&self, record: &RewardRecord, color: Color, depth: u8) -> f32 {
        if depth == 0 {
            return record.reward;
        }
        let opponent = color.opposite();
        let reply = self
            .table
            .entries(&record.successor, opponent)
            .iter()
            .map(|reply| self.value(reply, opponent, depth - 1))
            .reduce(f32::max);
        record.reward - reply.unwrap_or(0.0)
    }

    fn remember(&mut self, board: &Board, state: BoardKey, color: Color, choice: Position) {
        let mut next = board.clone();
        if let Err(err) = apply_move(&mut next, color, choice.col as i32, choice.row as i32) {
            warn!(%color, %choice, error = %err, "experience could not replay its own move");
            return;
        }
        let earned = reward(
            &stats(board, color),
            &stats(&next, color),
            &self.config.weights,
        );
        let inserted = self.table.record(state, color, choice, earned, hash(&next));
        debug!(%color, %choice, reward = earned, inserted, "experience recorded reward");
    }
}

impl MoveSelector for ExperienceSelector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn select_move(&mut self, board: &Board, color: Color) -> Option<Position> {
        let started = Instant::now();
        let moves = legal_moves(board, color);
        if moves.is_empty() {
            self.last_decision = Some(Decision::NoMove);
            return None;
        }

        let state = hash(board);
        let rate = self.config.exploration_rate.clamp(0.0, 1.0);
        let (choice, decision) = match self.best_recorded(&state, color, &moves) {
            Some((_, best))
                if best <= self.config.exploration_threshold && self.rng.random_bool(rate) =>
            {
                (random_move(&mut self.rng, &moves), Decision::Exploration)
            }
            Some((position, _)) => (Some(position), Decision::Table),
            None => (random_move(&mut self.rng, &moves), Decision::Random),
        };
        self.last_decision = Some(decision);

        let choice = choice?;
        self.remember(board, state.clone(), color, choice);
        debug!(
            %color,
            %choice,
            ?decision,
            %state,
            elapsed_us = started.elapsed().as_micros() as u64,
            "experience selected move"
        );
        Some(choice)
    }
}
