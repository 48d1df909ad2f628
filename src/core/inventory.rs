//! Card inventory: an ordered multiset of physical card copies

use crate::core::{Card, CardName, PackLayout, Rarity, Stage};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Ordered collection of card copies, consumed as cards are drawn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    cards: Vec<Card>,
}

impl Inventory {
    pub fn new() -> Self {
        Inventory::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Inventory { cards }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Add `quantity` identical copies of `card`
    pub fn add_copies(&mut self, card: Card, quantity: usize) {
        self.cards.extend(std::iter::repeat(card).take(quantity));
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Copies of the given rarity, in inventory order
    pub fn of_rarity(&self, rarity: Rarity) -> Vec<Card> {
        self.cards
            .iter()
            .filter(|c| c.rarity == rarity)
            .cloned()
            .collect()
    }

    /// Remove and return the first copy equal to `card`
    pub fn take(&mut self, card: &Card) -> Option<Card> {
        let index = self.cards.iter().position(|c| c == card)?;
        Some(self.cards.remove(index))
    }

    /// Number of copies with the given name
    pub fn count_named(&self, name: &str) -> usize {
        self.cards.iter().filter(|c| c.name == name).count()
    }

    /// Summarize rarity and stage coverage of this inventory
    pub fn summary(&self) -> InventorySummary {
        let mut summary = InventorySummary {
            total_cards: self.cards.len(),
            ..InventorySummary::default()
        };

        let mut names = FxHashSet::default();
        for card in &self.cards {
            names.insert(card.name.as_str());
            match card.rarity {
                Rarity::Rare => summary.rare += 1,
                Rarity::Uncommon => summary.uncommon += 1,
                Rarity::Common => summary.common += 1,
            }
            if card.is_trainer() {
                summary.trainers += 1;
                continue;
            }
            match card.stage {
                Some(Stage::Basic) => summary.basic += 1,
                Some(Stage::Stage1) => summary.stage_1 += 1,
                Some(Stage::Stage2) => summary.stage_2 += 1,
                None => summary.unstaged += 1,
            }
        }
        summary.unique_names = names.len();
        summary.orphans = self.orphan_evolutions();
        summary
    }

    /// Names of staged cards whose prerequisite can never be in the cube
    ///
    /// A card is an orphan when no copy in the inventory carries its
    /// `evolution` name at the required stage. Orphans are never drawn.
    pub fn orphan_evolutions(&self) -> Vec<CardName> {
        let available: FxHashSet<(&str, Stage)> = self
            .cards
            .iter()
            .filter_map(|c| c.stage.map(|s| (c.name.as_str(), s)))
            .collect();

        let mut seen = FxHashSet::default();
        let mut orphans = Vec::new();
        for card in &self.cards {
            let Some((prerequisite, stage)) = card.prerequisite() else {
                continue;
            };
            let satisfiable = prerequisite
                .map(|name| available.contains(&(name.as_str(), stage)))
                .unwrap_or(false);
            if !satisfiable && seen.insert(card.name.as_str()) {
                orphans.push(card.name.clone());
            }
        }
        orphans
    }
}

impl FromIterator<Card> for Inventory {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Inventory::from_cards(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

/// Rarity and stage counts for an inventory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_cards: usize,
    pub unique_names: usize,
    pub rare: usize,
    pub uncommon: usize,
    pub common: usize,
    pub trainers: usize,
    pub basic: usize,
    pub stage_1: usize,
    pub stage_2: usize,
    /// Non-trainer cards without a stage; these are never placed
    pub unstaged: usize,
    pub orphans: Vec<CardName>,
}

impl InventorySummary {
    /// Upper bound on the number of packs whose every slot can be filled
    pub fn full_packs(&self, layout: &PackLayout) -> usize {
        Rarity::ALL
            .iter()
            .filter_map(|&rarity| {
                let slots = layout.slots_for(rarity);
                (slots > 0).then(|| self.count(rarity) / slots)
            })
            .min()
            .unwrap_or(0)
    }

    pub fn count(&self, rarity: Rarity) -> usize {
        match rarity {
            Rarity::Rare => self.rare,
            Rarity::Uncommon => self.uncommon,
            Rarity::Common => self.common,
        }
    }
}
