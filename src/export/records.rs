//! Output records
//!
//! Field order of each record is the column order of its output file.

use crate::core::{Card, CardName, Pack, Rarity, Stage};
use crate::cube::CubeBuild;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Columns of the aggregated inventory and cube files
pub const INVENTORY_HEADERS: [&str; 7] = [
    "name",
    "type",
    "stage",
    "evolution",
    "rarity",
    "quantity",
    "order",
];

/// Columns of the pack manifest
pub const PACK_HEADERS: [&str; 7] = [
    "pack_number",
    "name",
    "type",
    "stage",
    "evolution",
    "rarity",
    "order",
];

/// One unique card name with its copy count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub name: CardName,
    #[serde(rename = "type")]
    pub card_type: String,
    pub stage: Option<Stage>,
    pub evolution: Option<CardName>,
    pub rarity: Rarity,
    pub quantity: usize,
    pub order: String,
}

impl InventoryRecord {
    fn first_copy(card: &Card) -> Self {
        InventoryRecord {
            name: card.name.clone(),
            card_type: card.card_type.clone(),
            stage: card.stage,
            evolution: card.evolution.clone(),
            rarity: card.rarity,
            quantity: 1,
            order: card.order.clone(),
        }
    }
}

/// One card of one pack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackRow {
    /// 1-based pack index
    pub pack_number: usize,
    pub name: CardName,
    #[serde(rename = "type")]
    pub card_type: String,
    pub stage: Option<Stage>,
    pub evolution: Option<CardName>,
    pub rarity: Rarity,
    pub order: String,
}

/// Collapse card copies into one record per name
///
/// Records keep first-seen order and the fields of the first copy with
/// each name.
pub fn aggregate<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Vec<InventoryRecord> {
    let mut index: FxHashMap<&'a CardName, usize> = FxHashMap::default();
    let mut records: Vec<InventoryRecord> = Vec::new();

    for card in cards {
        match index.get(&card.name) {
            Some(&i) => records[i].quantity += 1,
            None => {
                index.insert(&card.name, records.len());
                records.push(InventoryRecord::first_copy(card));
            }
        }
    }
    records
}

/// Manifest rows for `packs`, one per card in pack order
pub fn pack_rows(packs: &[Pack]) -> Vec<PackRow> {
    packs
        .iter()
        .enumerate()
        .flat_map(|(index, pack)| {
            pack.iter().map(move |card| PackRow {
                pack_number: index + 1,
                name: card.name.clone(),
                card_type: card.card_type.clone(),
                stage: card.stage,
                evolution: card.evolution.clone(),
                rarity: card.rarity,
                order: card.order.clone(),
            })
        })
        .collect()
}

/// Machine-readable summary of a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSummary {
    pub players: usize,
    pub seed: Option<u64>,
    pub target_size: usize,
    pub cube_size: usize,
    pub packs: usize,
    pub shortfall: usize,
    pub rare: usize,
    pub uncommon: usize,
    pub common: usize,
    pub remaining: usize,
}

impl BuildSummary {
    pub fn new(build: &CubeBuild, players: usize, seed: Option<u64>) -> Self {
        BuildSummary {
            players,
            seed,
            target_size: build.target_size,
            cube_size: build.cube.len(),
            packs: build.packs.len(),
            shortfall: build.shortfall(),
            rare: build.count_rarity(Rarity::Rare),
            uncommon: build.count_rarity(Rarity::Uncommon),
            common: build.count_rarity(Rarity::Common),
            remaining: build.remaining.len(),
        }
    }
}
