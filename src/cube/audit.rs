//! Post-build consistency checks
//!
//! `audit` re-derives the structural properties every build must have and
//! reports each one that does not hold. A build straight from
//! [`CubeBuilder`](crate::cube::CubeBuilder) always audits clean; the CLI
//! runs it anyway before writing output.

use crate::core::{CardName, Rarity};
use crate::cube::builder::CubeBuild;
use crate::cube::config::BuildConfig;
use crate::cube::selection::evolution_satisfied;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuditViolation {
    #[error("cube card #{position} {card} was placed before its prerequisite")]
    MissingPrerequisite { position: usize, card: CardName },

    #[error("pack {pack_number} has {count} {rarity} cards but only {slots} slots")]
    PackOverfilled {
        pack_number: usize,
        rarity: Rarity,
        count: usize,
        slots: usize,
    },

    #[error("pack {pack_number} is empty")]
    EmptyPack { pack_number: usize },

    #[error("cube holds {size} cards, more than the {target}-card target")]
    CubeOversized { size: usize, target: usize },

    #[error("cube order does not match the concatenated packs")]
    CubeOrderMismatch,

    #[error("{initial} cards loaded but {remaining} remaining + {cube} in cube")]
    InventoryNotConserved {
        initial: usize,
        remaining: usize,
        cube: usize,
    },
}

/// Check `build` against `config`, given the inventory size before building
pub fn audit(build: &CubeBuild, config: &BuildConfig, initial_len: usize) -> Vec<AuditViolation> {
    let mut violations = Vec::new();

    if build.cube.len() > config.target_size() {
        violations.push(AuditViolation::CubeOversized {
            size: build.cube.len(),
            target: config.target_size(),
        });
    }

    if build.remaining.len() + build.cube.len() != initial_len {
        violations.push(AuditViolation::InventoryNotConserved {
            initial: initial_len,
            remaining: build.remaining.len(),
            cube: build.cube.len(),
        });
    }

    let concatenated = build.packs.iter().flat_map(|p| p.iter());
    if !concatenated.eq(build.cube.iter()) {
        violations.push(AuditViolation::CubeOrderMismatch);
    }

    for (index, pack) in build.packs.iter().enumerate() {
        let pack_number = index + 1;
        if pack.is_empty() {
            violations.push(AuditViolation::EmptyPack { pack_number });
        }
        for rarity in Rarity::ALL {
            let count = pack.count_rarity(rarity);
            let slots = config.layout.slots_for(rarity);
            if count > slots {
                violations.push(AuditViolation::PackOverfilled {
                    pack_number,
                    rarity,
                    count,
                    slots,
                });
            }
        }
    }

    for (position, card) in build.cube.iter().enumerate() {
        if !evolution_satisfied(card, &build.cube[..position]) {
            violations.push(AuditViolation::MissingPrerequisite {
                position: position + 1,
                card: card.name.clone(),
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, Inventory, Pack, Stage};
    use crate::cube::build_cube;

    fn evolution_inventory() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.add_copies(Card::basic("Geodude", "Fighting", Rarity::Rare), 2);
        inventory.add_copies(
            Card::new("Graveler", "Fighting", Rarity::Uncommon)
                .with_stage(Stage::Stage1)
                .evolves_from("Geodude"),
            6,
        );
        inventory.add_copies(
            Card::new("Golem", "Fighting", Rarity::Rare)
                .with_stage(Stage::Stage2)
                .evolves_from("Graveler"),
            2,
        );
        inventory.add_copies(Card::basic("Geodude", "Fighting", Rarity::Common), 20);
        inventory.add_copies(Card::trainer("Energy Search", Rarity::Common), 10);
        inventory
    }

    #[test]
    fn test_builder_output_audits_clean() {
        let config = BuildConfig::new(1).unwrap();
        for seed in 0..20 {
            let inventory = evolution_inventory();
            let initial = inventory.len();
            let build = build_cube(inventory, 1, seed).unwrap();
            let violations = audit(&build, &config, initial);
            assert!(violations.is_empty(), "seed {seed}: {violations:?}");
        }
    }

    #[test]
    fn test_detects_out_of_order_evolution() {
        let graveler = Card::new("Graveler", "Fighting", Rarity::Uncommon)
            .with_stage(Stage::Stage1)
            .evolves_from("Geodude");
        let geodude = Card::basic("Geodude", "Fighting", Rarity::Common);

        let mut pack = Pack::new();
        pack.push(graveler.clone());
        pack.push(geodude.clone());
        let build = CubeBuild {
            packs: vec![pack],
            cube: vec![graveler, geodude],
            remaining: Inventory::new(),
            target_size: 44,
        };

        let violations = audit(&build, &BuildConfig::new(1).unwrap(), 2);
        assert_eq!(
            violations,
            vec![AuditViolation::MissingPrerequisite {
                position: 1,
                card: CardName::new("Graveler"),
            }]
        );
    }

    #[test]
    fn test_detects_conservation_and_overfill() {
        let mut pack = Pack::new();
        pack.push(Card::basic("Onix", "Fighting", Rarity::Rare));
        pack.push(Card::basic("Onix", "Fighting", Rarity::Rare));
        let build = CubeBuild {
            cube: pack.iter().cloned().collect(),
            packs: vec![pack, Pack::new()],
            remaining: Inventory::new(),
            target_size: 44,
        };

        let violations = audit(&build, &BuildConfig::new(1).unwrap(), 5);
        assert!(violations.contains(&AuditViolation::InventoryNotConserved {
            initial: 5,
            remaining: 0,
            cube: 2,
        }));
        assert!(violations.contains(&AuditViolation::PackOverfilled {
            pack_number: 1,
            rarity: Rarity::Rare,
            count: 2,
            slots: 1,
        }));
        assert!(violations.contains(&AuditViolation::EmptyPack { pack_number: 2 }));
    }
}
