//! Card types and definitions

use crate::core::CardName;
use crate::{CubeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Card type string that marks a trainer card
pub const TRAINER_TYPE: &str = "Trainer";

/// Evolutionary stage of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "Basic")]
    Basic,
    #[serde(rename = "Stage 1")]
    Stage1,
    #[serde(rename = "Stage 2")]
    Stage2,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Basic, Stage::Stage1, Stage::Stage2];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Basic => "Basic",
            Stage::Stage1 => "Stage 1",
            Stage::Stage2 => "Stage 2",
        }
    }

    /// Stage the prerequisite card must have for a card of this stage
    ///
    /// Basic cards have no prerequisite.
    pub fn prerequisite(&self) -> Option<Stage> {
        match self {
            Stage::Basic => None,
            Stage::Stage1 => Some(Stage::Basic),
            Stage::Stage2 => Some(Stage::Stage1),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "basic" => Ok(Stage::Basic),
            "stage1" => Ok(Stage::Stage1),
            "stage2" => Ok(Stage::Stage2),
            _ => Err(CubeError::ParseError(format!(
                "unknown stage '{s}' (expected: Basic, Stage 1, Stage 2)"
            ))),
        }
    }
}

/// Card rarity, which decides the pack slot a card can fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
}

impl Rarity {
    pub const ALL: [Rarity; 3] = [Rarity::Rare, Rarity::Uncommon, Rarity::Common];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "common" => Ok(Rarity::Common),
            "uncommon" => Ok(Rarity::Uncommon),
            "rare" => Ok(Rarity::Rare),
            _ => Err(CubeError::ParseError(format!(
                "unknown rarity '{s}' (expected: Common, Uncommon, Rare)"
            ))),
        }
    }
}

/// A single physical card copy
///
/// Copies of the same card are equal values; an inventory holds one
/// `Card` per physical copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card name (e.g., "Charmander")
    pub name: CardName,

    /// "Trainer" or a creature type (e.g., "Fire")
    #[serde(rename = "type")]
    pub card_type: String,

    /// Evolutionary stage. Trainer rows usually have none.
    pub stage: Option<Stage>,

    /// Name of the card this one evolves from
    pub evolution: Option<CardName>,

    pub rarity: Rarity,

    /// Opaque sort key carried through to the output files
    pub order: String,
}

impl Card {
    pub fn new(name: impl Into<CardName>, card_type: impl Into<String>, rarity: Rarity) -> Self {
        Card {
            name: name.into(),
            card_type: card_type.into(),
            stage: None,
            evolution: None,
            rarity,
            order: String::new(),
        }
    }

    /// Shorthand for a Basic creature card
    pub fn basic(name: impl Into<CardName>, card_type: impl Into<String>, rarity: Rarity) -> Self {
        Card::new(name, card_type, rarity).with_stage(Stage::Basic)
    }

    /// Shorthand for a Trainer card
    pub fn trainer(name: impl Into<CardName>, rarity: Rarity) -> Self {
        Card::new(name, TRAINER_TYPE, rarity)
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn evolves_from(mut self, prerequisite: impl Into<CardName>) -> Self {
        self.evolution = Some(prerequisite.into());
        self
    }

    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = order.into();
        self
    }

    pub fn is_trainer(&self) -> bool {
        self.card_type.eq_ignore_ascii_case(TRAINER_TYPE)
    }

    pub fn is_stage(&self, stage: Stage) -> bool {
        self.stage == Some(stage)
    }

    /// Prerequisite this card needs in the cube before it can be placed
    ///
    /// Returns the required card name and the stage it must have. `None`
    /// for Trainers, Basics and unstaged cards. A Stage 1/2 card without an
    /// evolution name still requires a prerequisite, which no card can
    /// satisfy.
    pub fn prerequisite(&self) -> Option<(Option<&CardName>, Stage)> {
        if self.is_trainer() {
            return None;
        }
        let required = self.stage?.prerequisite()?;
        Some((self.evolution.as_ref(), required))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.name, self.rarity)?;
        if let Some(stage) = self.stage {
            write!(f, ", {stage}")?;
        }
        if let Some(evolution) = &self.evolution {
            write!(f, " <- {evolution}")?;
        }
        write!(f, ")")
    }
}
