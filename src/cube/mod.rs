//! Cube construction
//!
//! ## Key Types
//!
//! - `BuildConfig`: player count, pack layout and draw weights
//! - `CubeBuilder`: fills packs slot by slot from an `Inventory`
//! - `CardSelector`: weighted draw plus evolution gating for one slot
//! - `CubeBuild`: packs, cube and leftover inventory of one build
//!
//! ## Evolution gating
//!
//! A Stage 1 card is only placed once a Basic named after its `evolution`
//! is in the cube, and a Stage 2 card once such a Stage 1 is. The cube
//! includes cards already placed in the pack being built.

pub mod audit;
pub mod builder;
pub mod config;
pub mod selection;

pub use audit::{audit, AuditViolation};
pub use builder::{build_cube, CubeBuild, CubeBuilder};
pub use config::{BuildConfig, StageWeights, PACKS_PER_PLAYER, TRAINER_SHARE};
pub use selection::{evolution_satisfied, select_card, CardSelector, SelectionMode};
