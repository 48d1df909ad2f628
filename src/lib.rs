//! Cube Forge - randomized trading-card cube builder
//!
//! Builds a pool of booster packs from a card inventory, respecting the
//! rarity layout of each pack and the evolution chains between cards.

pub mod core;
pub mod cube;
pub mod error;
pub mod export;
pub mod loader;

pub use error::{CubeError, Result};
