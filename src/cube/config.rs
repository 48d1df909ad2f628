//! Build configuration
//!
//! `BuildConfig` carries everything the builder needs besides the
//! inventory and the RNG. The defaults give 4 packs per player of
//! 1 Rare / 3 Uncommon / 7 Common, stage weights 1:2:3 and a 20%
//! trainer share in Common slots.

use crate::core::{PackLayout, Stage};
use crate::{CubeError, Result};
use serde::{Deserialize, Serialize};

/// Packs each player opens in a standard cube event
pub const PACKS_PER_PLAYER: usize = 4;

/// Aggregate draw probability of the trainer group in Common slots
pub const TRAINER_SHARE: f64 = 0.2;

/// Relative draw weight of each evolutionary stage in Rare/Uncommon slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageWeights {
    /// Weight for Basics and for cards without a stage
    pub basic: u32,
    pub stage_1: u32,
    pub stage_2: u32,
}

impl Default for StageWeights {
    fn default() -> Self {
        StageWeights {
            basic: 1,
            stage_1: 2,
            stage_2: 3,
        }
    }
}

impl StageWeights {
    pub fn weight(&self, stage: Option<Stage>) -> u32 {
        match stage {
            Some(Stage::Stage2) => self.stage_2,
            Some(Stage::Stage1) => self.stage_1,
            Some(Stage::Basic) | None => self.basic,
        }
    }
}

/// Configuration for one cube build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    pub players: usize,
    pub packs_per_player: usize,
    pub layout: PackLayout,
    pub stage_weights: StageWeights,
    /// Aggregate probability of drawing a trainer when a Common slot has
    /// both trainers and creatures to choose from
    pub trainer_share: f64,
}

impl BuildConfig {
    /// Standard configuration for `players` players
    pub fn new(players: usize) -> Result<Self> {
        if players == 0 {
            return Err(CubeError::InvalidPlayerCount(players));
        }
        Ok(BuildConfig {
            players,
            packs_per_player: PACKS_PER_PLAYER,
            layout: PackLayout::default(),
            stage_weights: StageWeights::default(),
            trainer_share: TRAINER_SHARE,
        })
    }

    #[must_use]
    pub fn with_packs_per_player(mut self, packs: usize) -> Self {
        self.packs_per_player = packs;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: PackLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_stage_weights(mut self, weights: StageWeights) -> Self {
        self.stage_weights = weights;
        self
    }

    #[must_use]
    pub fn with_trainer_share(mut self, share: f64) -> Self {
        self.trainer_share = share;
        self
    }

    /// Number of cards the finished cube should hold
    pub fn target_size(&self) -> usize {
        self.players * self.packs_per_player * self.layout.pack_size()
    }

    pub fn validate(&self) -> Result<()> {
        if self.players == 0 {
            return Err(CubeError::InvalidPlayerCount(self.players));
        }
        if self.packs_per_player == 0 {
            return Err(CubeError::InvalidConfig(
                "packs per player must be greater than 0".to_string(),
            ));
        }
        if self.layout.pack_size() == 0 {
            return Err(CubeError::InvalidConfig(
                "pack layout has no slots".to_string(),
            ));
        }
        let w = &self.stage_weights;
        if w.basic == 0 && w.stage_1 == 0 && w.stage_2 == 0 {
            return Err(CubeError::InvalidConfig(
                "at least one stage weight must be non-zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.trainer_share) {
            return Err(CubeError::InvalidConfig(format!(
                "trainer share {} is outside [0, 1]",
                self.trainer_share
            )));
        }
        Ok(())
    }
}
