//! Card selection for a single pack slot
//!
//! A slot draws a candidate from its rarity pool, checks the evolution
//! prerequisite against the cube built so far, and either commits the card
//! (removing one copy from the inventory) or discards the candidate from
//! the pool and draws again.
//!
//! Discarding only shrinks the candidate pool. The copy stays in the
//! inventory and is a candidate again for the next slot, which may see a
//! cube that now holds its prerequisite.

use crate::core::{Card, Inventory, Stage};
use crate::cube::config::{BuildConfig, StageWeights, TRAINER_SHARE};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::{debug, trace};

/// How a slot weights its candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Weight by evolutionary stage (Rare and Uncommon slots)
    StageWeighted,
    /// Split between trainers and creatures (Common slots)
    TrainerMix,
}

/// Weight table used to draw candidates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSelector {
    pub stage_weights: StageWeights,
    pub trainer_share: f64,
}

impl Default for CardSelector {
    fn default() -> Self {
        CardSelector {
            stage_weights: StageWeights::default(),
            trainer_share: TRAINER_SHARE,
        }
    }
}

impl CardSelector {
    pub fn from_config(config: &BuildConfig) -> Self {
        CardSelector {
            stage_weights: config.stage_weights,
            trainer_share: config.trainer_share,
        }
    }

    /// Draw the index of one candidate, without any prerequisite check
    ///
    /// Returns `None` for an empty pool, or when every candidate has zero
    /// weight.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        candidates: &[Card],
        mode: SelectionMode,
    ) -> Option<usize> {
        if candidates.is_empty() {
            return None;
        }
        match mode {
            SelectionMode::StageWeighted => {
                let weights = candidates
                    .iter()
                    .map(|c| self.stage_weights.weight(c.stage));
                let dist = WeightedIndex::new(weights).ok()?;
                Some(dist.sample(rng))
            }
            SelectionMode::TrainerMix => {
                let trainers = candidates.iter().filter(|c| c.is_trainer()).count();
                let creatures = candidates.len() - trainers;
                if trainers == 0 || creatures == 0 {
                    return Some(rng.gen_range(0..candidates.len()));
                }
                let trainer_weight = self.trainer_share / trainers as f64;
                let creature_weight = (1.0 - self.trainer_share) / creatures as f64;
                let weights = candidates.iter().map(|c| {
                    if c.is_trainer() {
                        trainer_weight
                    } else {
                        creature_weight
                    }
                });
                let dist = WeightedIndex::new(weights).ok()?;
                Some(dist.sample(rng))
            }
        }
    }

    /// Fill one slot from `candidates`
    ///
    /// `candidates` are copies of inventory cards of the slot's rarity.
    /// On success exactly one matching copy is removed from `inventory`.
    /// Returns `None` when no candidate satisfies its prerequisite.
    pub fn select<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        mut candidates: Vec<Card>,
        inventory: &mut Inventory,
        cube: &[Card],
        mode: SelectionMode,
    ) -> Option<Card> {
        while let Some(index) = self.draw(rng, &candidates, mode) {
            if evolution_satisfied(&candidates[index], cube) {
                if let Some(card) = inventory.take(&candidates[index]) {
                    trace!(card = %card, "slot filled");
                    return Some(card);
                }
            }
            let rejected = candidates.remove(index);
            debug!(
                card = %rejected,
                remaining = candidates.len(),
                "prerequisite not in cube, redrawing"
            );
        }
        None
    }
}

/// Fill one slot using the standard weight table
pub fn select_card<R: Rng + ?Sized>(
    rng: &mut R,
    candidates: Vec<Card>,
    inventory: &mut Inventory,
    cube: &[Card],
    mode: SelectionMode,
) -> Option<Card> {
    CardSelector::default().select(rng, candidates, inventory, cube, mode)
}

/// Whether `card` may be appended to `cube`
///
/// Trainers and Basics always may. A Stage 1 card needs a Basic named
/// after its `evolution` in the cube, a Stage 2 card needs such a Stage 1.
/// A creature with no stage is never placed.
pub fn evolution_satisfied(card: &Card, cube: &[Card]) -> bool {
    if card.is_trainer() {
        return true;
    }
    match card.stage {
        None => false,
        Some(Stage::Basic) => true,
        Some(_) => match card.prerequisite() {
            Some((Some(name), stage)) => cube
                .iter()
                .any(|c| c.name == *name && c.is_stage(stage)),
            _ => false,
        },
    }
}
