//! Card catalog.
//!
//! The catalog is the read-only source of card metadata for a session. The deck
//! engine only needs point lookups ([`CardLookup`]); the deck-assist operations
//! additionally walk the full listing through [`CardCatalog`].

use std::collections::HashMap;

use crate::card::Card;
use crate::filter::CardFilter;
use crate::ids::CardId;

/// Point lookup of cards by identifier.
pub trait CardLookup {
    fn lookup(&self, id: &CardId) -> Option<&Card>;

    fn contains(&self, id: &CardId) -> bool {
        self.lookup(id).is_some()
    }

    /// Resolves a card's display name, if the card is known.
    fn name_of(&self, id: &CardId) -> Option<&str> {
        self.lookup(id).map(|card| card.name.as_str())
    }
}

impl CardLookup for HashMap<CardId, Card> {
    fn lookup(&self, id: &CardId) -> Option<&Card> {
        self.get(id)
    }
}

impl<T: CardLookup + ?Sized> CardLookup for &T {
    fn lookup(&self, id: &CardId) -> Option<&Card> {
        (**self).lookup(id)
    }
}

/// Catalog of all known cards.
///
/// Cards keep their insertion order so that listings, and anything seeded from
/// them, are reproducible.
#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
    by_id: HashMap<CardId, usize>,
    /// Lowercased name -> first card registered with that name.
    by_name: HashMap<String, usize>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut catalog = Self::new();
        for card in cards {
            catalog.insert(card);
        }
        catalog
    }

    /// Register a card, replacing any earlier card with the same id.
    pub fn insert(&mut self, card: Card) {
        if let Some(&index) = self.by_id.get(&card.id) {
            let old_key = self.cards[index].name.to_lowercase();
            if self.by_name.get(&old_key) == Some(&index) {
                self.by_name.remove(&old_key);
            }
            self.by_name
                .entry(card.name.to_lowercase())
                .or_insert(index);
            self.cards[index] = card;
            return;
        }

        let index = self.cards.len();
        self.by_id.insert(card.id.clone(), index);
        self.by_name
            .entry(card.name.to_lowercase())
            .or_insert(index);
        self.cards.push(card);
    }

    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.by_id.get(id).map(|&index| &self.cards[index])
    }

    /// Look up a card by display name, ignoring case.
    pub fn get_by_name(&self, name: &str) -> Option<&Card> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(|&index| &self.cards[index])
    }

    /// Get all cards in insertion order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn leaders(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.is_leader())
    }

    pub fn bases(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.is_base())
    }

    /// Get all cards that may be counted in a deck ledger.
    pub fn playable(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.is_playable())
    }

    pub fn search<'a>(&'a self, filter: &'a CardFilter) -> impl Iterator<Item = &'a Card> + 'a {
        self.cards.iter().filter(move |c| filter.matches(c))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl CardLookup for CardCatalog {
    fn lookup(&self, id: &CardId) -> Option<&Card> {
        self.get(id)
    }
}

impl FromIterator<Card> for CardCatalog {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        Self::from_cards(iter)
    }
}

#[cfg(feature = "serialization")]
pub use self::json::CatalogError;

#[cfg(feature = "serialization")]
mod json {
    use std::fs;
    use std::io::BufReader;
    use std::path::{Path, PathBuf};

    use serde::Deserialize;
    use serde_json::Value;

    use super::CardCatalog;
    use crate::card::Card;

    #[derive(Debug, thiserror::Error)]
    pub enum CatalogError {
        #[error("failed to open card catalog {path}: {source}")]
        Io {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },
        #[error("failed to parse card catalog: {0}")]
        Json(#[from] serde_json::Error),
    }

    /// Either a bare card list or a page from the card database API.
    ///
    /// Cards stay as raw values so that one undecodable card does not sink
    /// the whole listing.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CatalogDocument {
        Cards(Vec<Value>),
        Page { data: Vec<Value> },
    }

    impl CatalogDocument {
        fn into_cards(self) -> Vec<Card> {
            let (CatalogDocument::Cards(raw) | CatalogDocument::Page { data: raw }) = self;
            raw.into_iter().filter_map(decode_card).collect()
        }
    }

    fn decode_card(value: Value) -> Option<Card> {
        let id = value
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or("<no id>")
            .to_string();
        match serde_json::from_value(value) {
            Ok(card) => Some(card),
            Err(err) => {
                tracing::warn!(card = %id, error = %err, "skipping undecodable card");
                None
            }
        }
    }

    impl CardCatalog {
        pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
            let document: CatalogDocument = serde_json::from_str(json)?;
            let catalog = Self::from_cards(document.into_cards());
            tracing::info!(cards = catalog.len(), "loaded card catalog");
            Ok(catalog)
        }

        pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
            let path = path.as_ref();
            let file = fs::File::open(path).map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let document: CatalogDocument = serde_json::from_reader(BufReader::new(file))?;
            let catalog = Self::from_cards(document.into_cards());
            tracing::info!(
                cards = catalog.len(),
                path = %path.display(),
                "loaded card catalog"
            );
            Ok(catalog)
        }
    }
}
