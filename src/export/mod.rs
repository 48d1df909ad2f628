//! Build output: aggregated records and the files they are written to

pub mod records;
pub mod writer;

pub use records::{aggregate, pack_rows, BuildSummary, InventoryRecord, PackRow};
pub use writer::{write_build, write_summary, OutputPaths};
