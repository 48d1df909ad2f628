//! Booster packs and their slot layout

use crate::core::{Card, Rarity};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of slots per rarity in a pack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackLayout {
    pub rare: usize,
    pub uncommon: usize,
    pub common: usize,
}

impl Default for PackLayout {
    fn default() -> Self {
        PackLayout {
            rare: 1,
            uncommon: 3,
            common: 7,
        }
    }
}

impl PackLayout {
    pub fn pack_size(&self) -> usize {
        self.rare + self.uncommon + self.common
    }

    pub fn slots_for(&self, rarity: Rarity) -> usize {
        match rarity {
            Rarity::Rare => self.rare,
            Rarity::Uncommon => self.uncommon,
            Rarity::Common => self.common,
        }
    }

    /// Slot rarities in fill order: rares, then uncommons, then commons
    pub fn slots(&self) -> impl Iterator<Item = Rarity> + '_ {
        Rarity::ALL
            .into_iter()
            .flat_map(move |rarity| std::iter::repeat(rarity).take(self.slots_for(rarity)))
    }
}

/// One pack of cards, in the order its slots were filled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pack {
    pub cards: SmallVec<[Card; 11]>,
}

impl Pack {
    pub fn new() -> Self {
        Pack::default()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
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

    pub fn count_rarity(&self, rarity: Rarity) -> usize {
        self.cards.iter().filter(|c| c.rarity == rarity).count()
    }

    /// True when every slot in `layout` was filled
    pub fn is_full(&self, layout: &PackLayout) -> bool {
        Rarity::ALL
            .iter()
            .all(|&r| self.count_rarity(r) == layout.slots_for(r))
    }
}

impl<'a> IntoIterator for &'a Pack {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
