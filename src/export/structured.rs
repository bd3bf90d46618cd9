//! Structured JSON export: the whole composition with resolved card data and
//! an export timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::catalog::CardLookup;
use crate::deck::DeckComposition;
use crate::ids::CardId;
use crate::ledger::Ledger;

/// A ledger entry with its card data, when the catalog knows the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedEntry {
    pub card_id: CardId,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredExport {
    pub exported_at: DateTime<Utc>,
    pub leader_id: Option<CardId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<Card>,
    pub base_id: Option<CardId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<Card>,
    #[serde(default)]
    pub main_entries: Vec<ExportedEntry>,
    #[serde(default)]
    pub side_entries: Vec<ExportedEntry>,
    #[serde(default)]
    pub overflow_entries: Vec<ExportedEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Build the structured document for a deck. Unknown cards are kept, without
/// card data.
pub fn export_structured<L: CardLookup + ?Sized>(
    deck: &DeckComposition,
    catalog: &L,
    exported_at: DateTime<Utc>,
) -> StructuredExport {
    let resolve = |id: Option<&CardId>| id.and_then(|id| catalog.lookup(id)).cloned();
    let entries = |ledger: Ledger| {
        deck.iter_entries(ledger)
            .map(|(card_id, count)| ExportedEntry {
                card_id: card_id.clone(),
                count,
                card: catalog.lookup(card_id).cloned(),
            })
            .collect::<Vec<_>>()
    };

    StructuredExport {
        exported_at,
        leader_id: deck.leader_id().cloned(),
        leader: resolve(deck.leader_id()),
        base_id: deck.base_id().cloned(),
        base: resolve(deck.base_id()),
        main_entries: entries(Ledger::Main),
        side_entries: entries(Ledger::Side),
        overflow_entries: entries(Ledger::Overflow),
        notes: deck.notes().map(str::to_string),
    }
}

impl StructuredExport {
    /// Export stamped with the current time.
    pub fn now<L: CardLookup + ?Sized>(deck: &DeckComposition, catalog: &L) -> Self {
        export_structured(deck, catalog, Utc::now())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Rebuild the composition, dropping the embedded card data.
    pub fn to_deck(&self) -> DeckComposition {
        let mut deck = DeckComposition::from_slots(self.leader_id.clone(), self.base_id.clone());
        for (ledger, entries) in [
            (Ledger::Main, &self.main_entries),
            (Ledger::Side, &self.side_entries),
            (Ledger::Overflow, &self.overflow_entries),
        ] {
            for entry in entries {
                deck.set_entry_count(entry.card_id.clone(), entry.count, ledger);
            }
        }
        deck.set_notes(self.notes.clone());
        deck
    }
}
