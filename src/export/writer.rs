//! CSV and JSON writers for build output

use crate::cube::CubeBuild;
use crate::export::records::{
    aggregate, pack_rows, BuildSummary, InventoryRecord, PackRow, INVENTORY_HEADERS, PACK_HEADERS,
};
use crate::{CubeError, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub const INVENTORY_FILE: &str = "card_list_out.csv";
pub const CUBE_FILE: &str = "cube_list.csv";
pub const PACKS_FILE: &str = "packs_list.csv";

/// Destination files for one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Remaining inventory
    pub inventory: PathBuf,
    pub cube: PathBuf,
    /// Pack manifest
    pub packs: PathBuf,
}

impl OutputPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        OutputPaths {
            inventory: dir.join(INVENTORY_FILE),
            cube: dir.join(CUBE_FILE),
            packs: dir.join(PACKS_FILE),
        }
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        OutputPaths::in_dir(Path::new("."))
    }
}

/// Write aggregated records; the header row is written even when empty
pub fn write_inventory_records<W: Write>(writer: W, records: &[InventoryRecord]) -> Result<()> {
    write_rows(writer, &INVENTORY_HEADERS, records)
}

/// Write the pack manifest
pub fn write_pack_rows<W: Write>(writer: W, rows: &[PackRow]) -> Result<()> {
    write_rows(writer, &PACK_HEADERS, rows)
}

fn write_rows<W: Write, T: Serialize>(writer: W, headers: &[&str], rows: &[T]) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(headers)?;
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush().map_err(CubeError::IoError)?;
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path).map_err(CubeError::IoError)?))
}

/// Write remaining inventory, cube and pack manifest
pub fn write_build(build: &CubeBuild, paths: &OutputPaths) -> Result<()> {
    write_inventory_records(create(&paths.inventory)?, &aggregate(&build.remaining))?;
    write_inventory_records(create(&paths.cube)?, &aggregate(&build.cube))?;
    write_pack_rows(create(&paths.packs)?, &pack_rows(&build.packs))?;

    info!(
        inventory = %paths.inventory.display(),
        cube = %paths.cube.display(),
        packs = %paths.packs.display(),
        "wrote build output"
    );
    Ok(())
}

/// Write a build summary as pretty-printed JSON
pub fn write_summary(path: &Path, summary: &BuildSummary) -> Result<()> {
    let mut writer = create(path)?;
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer.write_all(b"\n").map_err(CubeError::IoError)?;
    writer.flush().map_err(CubeError::IoError)?;
    Ok(())
}
