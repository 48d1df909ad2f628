//! Inventory loaders
//!
//! Parser for the card list format (.csv)

pub mod inventory;

pub use inventory::{InventoryLoader, LoadReport, SkippedRow};
