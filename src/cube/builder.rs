//! Cube builder
//!
//! Builds packs slot by slot until the cube holds `BuildConfig::target_size`
//! cards or the inventory can no longer fill a single slot.

use crate::core::{Card, Inventory, Pack, Rarity};
use crate::cube::config::BuildConfig;
use crate::cube::selection::{CardSelector, SelectionMode};
use crate::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Result of a cube build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeBuild {
    /// Packs in build order. Never contains an empty pack.
    pub packs: Vec<Pack>,
    /// All cards of all packs, in the order they were committed
    pub cube: Vec<Card>,
    /// Inventory left after the build
    pub remaining: Inventory,
    pub target_size: usize,
}

impl CubeBuild {
    /// Number of cards the cube is short of its target
    pub fn shortfall(&self) -> usize {
        self.target_size.saturating_sub(self.cube.len())
    }

    pub fn is_complete(&self) -> bool {
        self.shortfall() == 0
    }

    pub fn count_rarity(&self, rarity: Rarity) -> usize {
        self.cube.iter().filter(|c| c.rarity == rarity).count()
    }
}

/// Builds cubes from an inventory
pub struct CubeBuilder<R = ChaCha12Rng> {
    config: BuildConfig,
    selector: CardSelector,
    rng: R,
}

impl CubeBuilder<ChaCha12Rng> {
    /// Create a builder seeded from system entropy
    pub fn new(config: BuildConfig) -> Result<Self> {
        Self::with_rng(config, ChaCha12Rng::from_entropy())
    }

    /// Create a builder with a fixed seed (for deterministic builds)
    pub fn with_seed(config: BuildConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, ChaCha12Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> CubeBuilder<R> {
    pub fn with_rng(config: BuildConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(CubeBuilder {
            selector: CardSelector::from_config(&config),
            config,
            rng,
        })
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build a cube, consuming cards from `inventory`
    ///
    /// A cube smaller than the target is not an error; check
    /// [`CubeBuild::shortfall`].
    pub fn build(&mut self, mut inventory: Inventory) -> CubeBuild {
        let target_size = self.config.target_size();
        info!(
            players = self.config.players,
            target_size,
            inventory = inventory.len(),
            "building cube"
        );

        let mut packs = Vec::new();
        let mut cube = Vec::with_capacity(target_size);

        while cube.len() < target_size {
            let pack = self.build_pack(&mut inventory, &mut cube, target_size);
            if pack.is_empty() {
                break;
            }
            if !pack.is_full(&self.config.layout) {
                debug!(
                    pack_number = packs.len() + 1,
                    cards = pack.len(),
                    "pack only partially filled"
                );
            }
            packs.push(pack);
        }

        let build = CubeBuild {
            packs,
            cube,
            remaining: inventory,
            target_size,
        };

        if build.is_complete() {
            info!(
                packs = build.packs.len(),
                cube = build.cube.len(),
                remaining = build.remaining.len(),
                "cube complete"
            );
        } else {
            warn!(
                packs = build.packs.len(),
                cube = build.cube.len(),
                missing = build.shortfall(),
                "inventory exhausted before the cube reached its target size"
            );
        }
        build
    }

    /// Fill one pack, appending each committed card to `cube` as it goes
    ///
    /// Later slots see earlier slots' cards for prerequisite checks. Stops
    /// early once `cube` reaches `target_size`.
    pub fn build_pack(
        &mut self,
        inventory: &mut Inventory,
        cube: &mut Vec<Card>,
        target_size: usize,
    ) -> Pack {
        let mut pack = Pack::new();
        let slots: Vec<Rarity> = self.config.layout.slots().collect();

        for rarity in slots {
            if cube.len() >= target_size {
                break;
            }
            let candidates = inventory.of_rarity(rarity);
            if candidates.is_empty() {
                continue;
            }
            let mode = match rarity {
                Rarity::Common => SelectionMode::TrainerMix,
                Rarity::Rare | Rarity::Uncommon => SelectionMode::StageWeighted,
            };
            match self
                .selector
                .select(&mut self.rng, candidates, inventory, cube, mode)
            {
                Some(card) => {
                    debug!(card = %card, "slot filled");
                    cube.push(card.clone());
                    pack.push(card);
                }
                None => debug!(%rarity, "no eligible card for slot"),
            }
        }
        pack
    }
}

/// Build a standard cube for `players` players with a fixed seed
pub fn build_cube(inventory: Inventory, players: usize, seed: u64) -> Result<CubeBuild> {
    let config = BuildConfig::new(players)?;
    Ok(CubeBuilder::with_seed(config, seed)?.build(inventory))
}
