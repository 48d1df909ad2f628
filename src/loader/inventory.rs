//! Inventory loader (.csv format)
//!
//! Reads the card list CSV: one row per card with a `quantity` column.
//! Columns are matched by header name and may appear in any order.
//!
//! ```text
//! name,type,stage,evolution,rarity,quantity,order
//! Charmander,Fire,Basic,,Common,4,004
//! Charmeleon,Fire,Stage 1,Charmander,Uncommon,2,005
//! Potion,Trainer,,,Common,6,T01
//! ```

use crate::core::{Card, CardName, Inventory, Rarity, Stage};
use crate::{CubeError, Result};
use csv::StringRecord;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// A row as it appears in the file, before validation
#[derive(Debug, Deserialize)]
struct RawRow {
    name: Option<String>,
    #[serde(rename = "type")]
    card_type: Option<String>,
    stage: Option<String>,
    evolution: Option<String>,
    rarity: Option<String>,
    quantity: Option<String>,
    order: Option<String>,
}

/// A row that was skipped while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Line number in the source file (header is line 1)
    pub line: usize,
    pub reason: String,
}

/// Outcome of loading an inventory file
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub inventory: Inventory,
    /// Rows that produced cards (including zero-quantity rows)
    pub rows_loaded: usize,
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    pub fn into_inventory(self) -> Inventory {
        self.inventory
    }

    fn skip(&mut self, line: usize, reason: String) {
        warn!(line, %reason, "skipping inventory row");
        self.skipped.push(SkippedRow { line, reason });
    }

    /// The loaded inventory, or `NoCardsLoaded` if it is empty
    pub fn require_cards(self, source: &str) -> Result<Inventory> {
        if self.inventory.is_empty() {
            return Err(CubeError::NoCardsLoaded(source.to_string()));
        }
        Ok(self.inventory)
    }
}

/// Inventory loader for .csv files
pub struct InventoryLoader;

impl InventoryLoader {
    /// Load an inventory from a CSV file
    pub fn load_from_file(path: &Path) -> Result<LoadReport> {
        let file = File::open(path).map_err(CubeError::IoError)?;
        let report = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            cards = report.inventory.len(),
            skipped = report.skipped.len(),
            "loaded inventory"
        );
        Ok(report)
    }

    /// Parse an inventory from CSV text
    pub fn parse(content: &str) -> Result<LoadReport> {
        Self::from_reader(content.as_bytes())
    }

    /// Parse an inventory from any reader
    ///
    /// Malformed rows are skipped and recorded in the report. Only an
    /// unreadable header is an error.
    pub fn from_reader<R: Read>(reader: R) -> Result<LoadReport> {
        let mut csv = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: StringRecord = csv
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim())
            .collect();
        debug!(?headers, "inventory columns");

        let mut report = LoadReport::default();
        for (index, result) in csv.records().enumerate() {
            // Header is line 1
            let fallback_line = index + 2;
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    report.skip(fallback_line, e.to_string());
                    continue;
                }
            };
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(fallback_line);

            match Self::parse_row(&record, &headers) {
                Ok((card, quantity)) => {
                    if quantity == 0 {
                        debug!(line, card = %card.name, "row has zero quantity");
                    }
                    report.inventory.add_copies(card, quantity);
                    report.rows_loaded += 1;
                }
                Err(reason) => report.skip(line, reason),
            }
        }
        Ok(report)
    }

    /// Validate one record into a card and its copy count
    fn parse_row(
        record: &StringRecord,
        headers: &StringRecord,
    ) -> std::result::Result<(Card, usize), String> {
        let raw: RawRow = record
            .deserialize(Some(headers))
            .map_err(|e| e.to_string())?;

        let name = required("name", raw.name)?;
        let card_type = required("type", raw.card_type)?;
        let rarity = required("rarity", raw.rarity)?
            .parse::<Rarity>()
            .map_err(|e| e.to_string())?;
        let quantity_text = required("quantity", raw.quantity)?;
        let quantity = quantity_text
            .parse::<usize>()
            .map_err(|_| format!("invalid quantity '{quantity_text}'"))?;
        let has_column = |column: &str| headers.iter().any(|h| h == column);
        if !has_column("stage") {
            return Err("missing column 'stage'".to_string());
        }
        if !has_column("order") {
            return Err("missing column 'order'".to_string());
        }
        let stage = match raw.stage {
            Some(s) if !s.trim().is_empty() => {
                Some(s.parse::<Stage>().map_err(|e| e.to_string())?)
            }
            _ => None,
        };
        let order = raw.order.unwrap_or_default();
        let evolution = raw
            .evolution
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .map(CardName::new);

        let card = Card {
            name: CardName::new(name),
            card_type,
            stage,
            evolution,
            rarity,
            order: order.trim().to_string(),
        };
        Ok((card, quantity))
    }
}

/// A field that must be present and non-empty
fn required(column: &str, value: Option<String>) -> std::result::Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        Some(_) => Err(format!("empty '{column}' field")),
        None => Err(format!("missing '{column}' field")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_inventory() {
        let content = "\
name,type,stage,evolution,rarity,quantity,order
Charmander,Fire,Basic,,Common,4,004
Charmeleon,Fire,Stage 1,Charmander,Uncommon,2,005
Potion,Trainer,,,Common,3,T01
";
        let report = InventoryLoader::parse(content).unwrap();
        assert!(report.skipped.is_empty());
        assert_eq!(report.rows_loaded, 3);

        let inventory = report.into_inventory();
        assert_eq!(inventory.len(), 9);
        assert_eq!(inventory.count_named("Charmander"), 4);

        let charmeleon = &inventory.cards()[4];
        assert_eq!(charmeleon.name, "Charmeleon");
        assert_eq!(charmeleon.stage, Some(Stage::Stage1));
        assert_eq!(charmeleon.evolution, Some(CardName::new("Charmander")));
        assert_eq!(charmeleon.rarity, Rarity::Uncommon);
        assert_eq!(charmeleon.order, "005");

        let potion = &inventory.cards()[8];
        assert!(potion.is_trainer());
        assert_eq!(potion.stage, None);
        assert_eq!(potion.evolution, None);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let content = "\
name,type,stage,evolution,rarity,quantity,order
Pikachu,Lightning,Basic,,Common,two,025
,Lightning,Basic,,Common,1,026
Raichu,Lightning,Stage 1,Pikachu,Holo,1,026
Mew,Psychic,Basic,,Rare,1,151
";
        let report = InventoryLoader::parse(content).unwrap();
        assert_eq!(report.inventory.len(), 1);
        assert_eq!(report.skipped.len(), 3);
        assert_eq!(report.skipped[0].line, 2);
        assert!(report.skipped[0].reason.contains("quantity"));
        assert!(report.skipped[1].reason.contains("name"));
        assert!(report.skipped[2].reason.contains("rarity"));
    }

    #[test]
    fn test_columns_by_header_name() {
        let content = "\
order,quantity,rarity,name,type,stage
007,2,Common,Squirtle,Water,Basic
";
        let inventory = InventoryLoader::parse(content).unwrap().into_inventory();
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.cards()[0].name, "Squirtle");
        assert_eq!(inventory.cards()[0].evolution, None);
    }

    #[test]
    fn test_missing_required_column() {
        let content = "\
name,type,stage,rarity,quantity
Squirtle,Water,Basic,Common,2
";
        let report = InventoryLoader::parse(content).unwrap();
        assert!(report.inventory.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].reason.contains("order"));
    }

    #[test]
    fn test_byte_order_mark_is_stripped() {
        let content = "\u{feff}name,type,stage,evolution,rarity,quantity,order\nOnix,Fighting,Basic,,Uncommon,1,095\n";
        let inventory = InventoryLoader::parse(content).unwrap().into_inventory();
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.cards()[0].name, "Onix");
    }

    #[test]
    fn test_zero_quantity_row() {
        let content = "\
name,type,stage,evolution,rarity,quantity,order
Ditto,Colorless,Basic,,Rare,0,132
";
        let report = InventoryLoader::parse(content).unwrap();
        assert_eq!(report.rows_loaded, 1);
        assert!(report.skipped.is_empty());
        assert!(matches!(
            report.require_cards("inline"),
            Err(CubeError::NoCardsLoaded(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        let report = InventoryLoader::parse("").unwrap();
        assert!(report.inventory.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let result = InventoryLoader::load_from_file(Path::new("does/not/exist.csv"));
        assert!(matches!(result, Err(CubeError::IoError(_))));
    }
}
