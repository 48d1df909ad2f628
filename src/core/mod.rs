//! Core card types: cards, packs, and inventories

pub mod card;
pub mod inventory;
pub mod pack;
pub mod types;

pub use card::{Card, Rarity, Stage, TRAINER_TYPE};
pub use inventory::{Inventory, InventorySummary};
pub use pack::{Pack, PackLayout};
pub use types::CardName;
