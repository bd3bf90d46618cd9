//! Filter for searching the card catalog.
//!
//! Mirrors the browsing criteria of the card search panel: free-text query,
//! aspects, types, sets, rarities and a cost ceiling. Empty criteria match
//! everything.

use crate::aspect::{Aspect, AspectSet};
use crate::card::Card;
use crate::types::CardType;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    /// Case-insensitive substring matched against name, rules text and traits.
    pub query: Option<String>,
    /// Matches cards with any of these aspects.
    pub aspects: AspectSet,
    pub card_types: Vec<CardType>,
    pub set_codes: Vec<String>,
    pub rarities: Vec<String>,
    /// Uncosted cards never pass a cost ceiling.
    pub max_cost: Option<u32>,
}

impl CardFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = if query.trim().is_empty() {
            None
        } else {
            Some(query.trim().to_lowercase())
        };
        self
    }

    pub fn aspect(mut self, aspect: Aspect) -> Self {
        self.aspects = self.aspects.with(aspect);
        self
    }

    pub fn card_type(mut self, card_type: CardType) -> Self {
        if !self.card_types.contains(&card_type) {
            self.card_types.push(card_type);
        }
        self
    }

    pub fn set_code(mut self, set_code: impl Into<String>) -> Self {
        self.set_codes.push(set_code.into());
        self
    }

    pub fn rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarities.push(rarity.into());
        self
    }

    pub fn max_cost(mut self, cost: u32) -> Self {
        self.max_cost = Some(cost);
        self
    }

    pub fn matches(&self, card: &Card) -> bool {
        if let Some(query) = &self.query
            && !text_matches(card, query)
        {
            return false;
        }

        if !self.aspects.is_empty() && !card.shares_aspect_with(self.aspects) {
            return false;
        }

        if !self.card_types.is_empty() && !self.card_types.contains(&card.card_type) {
            return false;
        }

        if !self.set_codes.is_empty()
            && !self
                .set_codes
                .iter()
                .any(|code| code.eq_ignore_ascii_case(&card.set_code))
        {
            return false;
        }

        if !self.rarities.is_empty() {
            let Some(rarity) = card.rarity.as_deref() else {
                return false;
            };
            if !self.rarities.iter().any(|r| r.eq_ignore_ascii_case(rarity)) {
                return false;
            }
        }

        if let Some(max_cost) = self.max_cost {
            match card.cost {
                Some(cost) if cost <= max_cost => {}
                _ => return false,
            }
        }

        true
    }
}

fn text_matches(card: &Card, query: &str) -> bool {
    card.name.to_lowercase().contains(query)
        || card
            .text
            .as_deref()
            .is_some_and(|text| text.to_lowercase().contains(query))
        || card.traits.iter().any(|t| t.to_lowercase().contains(query))
}
