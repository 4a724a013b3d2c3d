use serde::Deserialize;

use crate::error::{ReversiError, Result};
use crate::types::Color;

pub const DEFAULT_COLUMNS: u8 = 8;
pub const DEFAULT_ROWS: u8 = 8;
/// Deepest reward-table lookahead; every ply multiplies the recorded paths walked.
pub const MAX_LOOKAHEAD_DEPTH: u8 = 3;

/// Which computer opponent to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Heuristic,
    Experience,
}

/// Weights of the experience reward: `corners * corner + edges * edge + total / total_divisor`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RewardWeights {
    pub corner: f32,
    pub edge: f32,
    pub total_divisor: f32,
}

impl Default for RewardWeights {
    fn default() -> Self {
        Self {
            corner: 6.0,
            edge: 1.0,
            total_divisor: 16.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceConfig {
    /// A remembered move whose reward is at or below this is a candidate for exploration.
    pub exploration_threshold: f32,
    /// Probability of replacing a low-reward remembered move by a random one.
    pub exploration_rate: f64,
    /// Plies of recorded opponent replies to subtract from a move's reward. 0 disables.
    pub lookahead_depth: u8,
    pub weights: RewardWeights,
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        Self {
            exploration_threshold: 2.0,
            exploration_rate: 0.7,
            lookahead_depth: 0,
            weights: RewardWeights::default(),
        }
    }
}

/// Options accepted when a game is created.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub columns: u8,
    pub rows: u8,
    /// Color controlled by the human. `None` means both sides are human.
    pub human_color: Option<Color>,
    pub strategy: StrategyKind,
    /// Color seeded on the main diagonal of the center square.
    pub diagonal_color: Color,
    /// Seed for the AI's random choices; wall clock when absent.
    pub seed: Option<u64>,
    pub experience: ExperienceConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            human_color: Some(Color::Black),
            strategy: StrategyKind::default(),
            diagonal_color: Color::White,
            seed: None,
            experience: ExperienceConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn with_size(columns: u8, rows: u8) -> Self {
        Self {
            columns,
            rows,
            ..Self::default()
        }
    }

    /// Color played by the computer, if any.
    pub fn ai_color(&self) -> Option<Color> {
        self.human_color.map(Color::opposite)
    }

    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.columns, self.rows)?;
        self.experience.validate()
    }
}

impl ExperienceConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return Err(ReversiError::configuration(format!(
                "exploration rate must be within [0, 1], got {}",
                self.exploration_rate
            )));
        }
        if !self.exploration_threshold.is_finite() {
            return Err(ReversiError::configuration(
                "exploration threshold must be finite",
            ));
        }
        if self.lookahead_depth > MAX_LOOKAHEAD_DEPTH {
            return Err(ReversiError::configuration(format!(
                "lookahead depth must be at most {MAX_LOOKAHEAD_DEPTH}, got {}",
                self.lookahead_depth
            )));
        }
        self.weights.validate()
    }
}

impl RewardWeights {
    /// Corners must outweigh edges, which must outweigh raw disk count.
    pub fn validate(&self) -> Result<()> {
        if !(self.total_divisor.is_finite() && self.total_divisor > 0.0) {
            return Err(ReversiError::configuration(format!(
                "total divisor must be positive, got {}",
                self.total_divisor
            )));
        }
        if !(self.corner > self.edge && self.edge > 1.0 / self.total_divisor) {
            return Err(ReversiError::configuration(format!(
                "reward weights must order corner > edge > total, got corner={} edge={} divisor={}",
                self.corner, self.edge, self.total_divisor
            )));
        }
        Ok(())
    }
}

/// Boards must be even in both dimensions and at least 2x2 to seed the center square.
pub fn validate_dimensions(columns: u8, rows: u8) -> Result<()> {
    if columns < 2 || rows < 2 {
        return Err(ReversiError::configuration(format!(
            "board must be at least 2x2, got {columns}x{rows}"
        )));
    }
    if columns % 2 != 0 || rows % 2 != 0 {
        return Err(ReversiError::configuration(format!(
            "board dimensions must be even, got {columns}x{rows}"
        )));
    }
    Ok(())
}
