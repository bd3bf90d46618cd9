//! Deck composition model.
//!
//! A [`DeckComposition`] is the deck-in-progress owned by one editing session:
//! an optional leader and base plus three independent ledgers of card counts.
//! Ledger contents change only through [`DeckComposition::set_entry_count`],
//! which keeps at most one entry per card and never stores a zero count.

use std::collections::BTreeMap;

use crate::card::Card;
use crate::ids::CardId;
use crate::ledger::Ledger;
use crate::types::CardType;

/// A (card, count) pair within one ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct DeckEntry {
    pub card_id: CardId,
    pub count: u32,
}

impl DeckEntry {
    pub fn new(card_id: impl Into<CardId>, count: u32) -> Self {
        Self {
            card_id: card_id.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    #[error("{id} is a {found} card; the {expected} slot needs a {expected} card")]
    WrongCardType {
        id: CardId,
        expected: CardType,
        found: CardType,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "document::DeckDocument", from = "document::DeckDocument")
)]
pub struct DeckComposition {
    leader_id: Option<CardId>,
    base_id: Option<CardId>,
    main: BTreeMap<CardId, u32>,
    side: BTreeMap<CardId, u32>,
    overflow: BTreeMap<CardId, u32>,
    notes: Option<String>,
}

impl DeckComposition {
    /// Creates an empty deck: no leader or base, all ledgers empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty deck with the given slot ids, unchecked against any
    /// catalog. Used when loading stored documents.
    pub fn from_slots(leader_id: Option<CardId>, base_id: Option<CardId>) -> Self {
        Self {
            leader_id,
            base_id,
            ..Self::default()
        }
    }

    pub fn leader_id(&self) -> Option<&CardId> {
        self.leader_id.as_ref()
    }

    pub fn base_id(&self) -> Option<&CardId> {
        self.base_id.as_ref()
    }

    /// Replaces the leader slot. Ledgers are left untouched.
    pub fn set_leader(&mut self, card: Option<&Card>) -> Result<(), DeckError> {
        self.leader_id = slot_id(card, CardType::Leader)?;
        Ok(())
    }

    /// Replaces the base slot. Ledgers are left untouched.
    pub fn set_base(&mut self, card: Option<&Card>) -> Result<(), DeckError> {
        self.base_id = slot_id(card, CardType::Base)?;
        Ok(())
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes.filter(|n| !n.is_empty());
    }

    /// Sets the count of `card_id` in `ledger`, replacing any existing entry.
    ///
    /// A count of zero removes the entry.
    pub fn set_entry_count(&mut self, card_id: impl Into<CardId>, count: u32, ledger: Ledger) {
        let card_id = card_id.into();
        let entries = self.ledger_mut(ledger);
        if count == 0 {
            entries.remove(&card_id);
        } else {
            entries.insert(card_id, count);
        }
    }

    /// Returns the count of `card_id` in `ledger` (0 when absent).
    pub fn card_count(&self, card_id: &CardId, ledger: Ledger) -> u32 {
        self.ledger(ledger).get(card_id).copied().unwrap_or(0)
    }

    /// Returns the count of `card_id` summed over all ledgers.
    pub fn total_copies(&self, card_id: &CardId) -> u32 {
        Ledger::ALL
            .into_iter()
            .map(|ledger| self.card_count(card_id, ledger))
            .fold(0, u32::saturating_add)
    }

    /// Sum of counts in `ledger`, saturating at `u32::MAX`.
    pub fn total_count(&self, ledger: Ledger) -> u32 {
        self.ledger(ledger)
            .values()
            .fold(0, |total, &count| total.saturating_add(count))
    }

    /// Returns the entries of `ledger`, ordered by card id.
    pub fn entries(&self, ledger: Ledger) -> Vec<DeckEntry> {
        self.iter_entries(ledger)
            .map(|(card_id, count)| DeckEntry::new(card_id.clone(), count))
            .collect()
    }

    pub fn iter_entries(&self, ledger: Ledger) -> impl Iterator<Item = (&CardId, u32)> {
        self.ledger(ledger).iter().map(|(id, &count)| (id, count))
    }

    /// Read-only view of a ledger.
    pub fn ledger(&self, ledger: Ledger) -> &BTreeMap<CardId, u32> {
        match ledger {
            Ledger::Main => &self.main,
            Ledger::Side => &self.side,
            Ledger::Overflow => &self.overflow,
        }
    }

    fn ledger_mut(&mut self, ledger: Ledger) -> &mut BTreeMap<CardId, u32> {
        match ledger {
            Ledger::Main => &mut self.main,
            Ledger::Side => &mut self.side,
            Ledger::Overflow => &mut self.overflow,
        }
    }

    /// Moves up to `count` copies of `card_id` from one ledger to another.
    ///
    /// Built from two `set_entry_count` calls. Returns the number of copies
    /// actually moved, which is bounded by what `from` holds.
    pub fn move_entries(&mut self, card_id: &CardId, count: u32, from: Ledger, to: Ledger) -> u32 {
        if from == to {
            return 0;
        }
        let have = self.card_count(card_id, from);
        let moved = count.min(have);
        if moved == 0 {
            return 0;
        }
        let already = self.card_count(card_id, to);
        self.set_entry_count(card_id.clone(), have - moved, from);
        self.set_entry_count(card_id.clone(), already.saturating_add(moved), to);
        moved
    }

    /// Returns true when no leader, base, or ledger entry is present.
    pub fn is_empty(&self) -> bool {
        self.leader_id.is_none()
            && self.base_id.is_none()
            && Ledger::ALL
                .into_iter()
                .all(|ledger| self.ledger(ledger).is_empty())
    }
}

fn slot_id(card: Option<&Card>, expected: CardType) -> Result<Option<CardId>, DeckError> {
    match card {
        None => Ok(None),
        Some(card) if card.card_type == expected => Ok(Some(card.id.clone())),
        Some(card) => Err(DeckError::WrongCardType {
            id: card.id.clone(),
            expected,
            found: card.card_type,
        }),
    }
}

#[cfg(feature = "serialization")]
mod document {
    use super::{DeckComposition, DeckEntry};
    use crate::ids::CardId;
    use crate::ledger::Ledger;
    use serde::{Deserialize, Serialize};

    /// Interchange shape of a deck version.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct DeckDocument {
        leader_id: Option<CardId>,
        base_id: Option<CardId>,
        main_entries: Vec<DeckEntry>,
        side_entries: Vec<DeckEntry>,
        overflow_entries: Vec<DeckEntry>,
        #[serde(skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    }

    impl From<DeckComposition> for DeckDocument {
        fn from(deck: DeckComposition) -> Self {
            Self {
                main_entries: deck.entries(Ledger::Main),
                side_entries: deck.entries(Ledger::Side),
                overflow_entries: deck.entries(Ledger::Overflow),
                leader_id: deck.leader_id,
                base_id: deck.base_id,
                notes: deck.notes,
            }
        }
    }

    impl From<DeckDocument> for DeckComposition {
        fn from(doc: DeckDocument) -> Self {
            let mut deck = DeckComposition::from_slots(doc.leader_id, doc.base_id);
            deck.set_notes(doc.notes);
            for (ledger, entries) in [
                (Ledger::Main, doc.main_entries),
                (Ledger::Side, doc.side_entries),
                (Ledger::Overflow, doc.overflow_entries),
            ] {
                for entry in entries {
                    deck.set_entry_count(entry.card_id, entry.count, ledger);
                }
            }
            deck
        }
    }
}
