//! Deck-assist operations.
//!
//! These are heuristics that move a deck toward a legal state. They mutate the
//! deck only through [`DeckComposition::set_entry_count`], never raise a card
//! above the copy limit, and never push the main deck past its minimum size.
//! Randomized operations take the random source as a parameter so that a
//! seeded generator reproduces the same result.
//!
//! When a precondition is not met the deck is left untouched and an
//! [`AssistError`] is returned; it is a user-facing outcome, not a fault.

pub mod auto_fill;
pub mod balance;
pub mod clear;
pub mod random_deck;
pub mod recommend;

pub use auto_fill::{auto_fill, auto_fill_with_rules};
pub use balance::{balance_aspects, balance_aspects_with_rules};
pub use clear::clear_main;
pub use random_deck::{random_deck, random_deck_with_rules};
pub use recommend::{Recommendation, recommend};

use crate::aspect::AspectSet;
use crate::card::Card;
use crate::catalog::CardCatalog;
use crate::deck::{DeckComposition, DeckError};
use crate::ids::CardId;
use crate::ledger::Ledger;
use crate::rules::DeckRules;
use crate::types::CardType;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssistError {
    #[error("select a leader first")]
    LeaderMissing,
    #[error("select a base first")]
    BaseMissing,
    #[error("leader {0} is not in the card catalog")]
    UnknownLeader(CardId),
    #[error("base {0} is not in the card catalog")]
    UnknownBase(CardId),
    #[error("leader and base must share at least one aspect")]
    NoSharedAspects,
    #[error(transparent)]
    WrongSlot(#[from] DeckError),
}

/// Why an assist operation finished without changing the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoActionReason {
    /// The main deck already holds the minimum number of cards.
    DeckFull,
    /// Every shared aspect is already represented well enough.
    AlreadyBalanced,
    /// No catalog card is eligible to be added.
    NoCandidates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistOutcome {
    /// This many copies were added to the main deck.
    Added(u32),
    NoAction(NoActionReason),
}

impl AssistOutcome {
    /// Copies added by the operation (0 when no action was taken).
    pub fn added(self) -> u32 {
        match self {
            AssistOutcome::Added(count) => count,
            AssistOutcome::NoAction(_) => 0,
        }
    }
}

impl std::fmt::Display for AssistOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssistOutcome::Added(count) => write!(f, "Added {count} cards to the main deck"),
            AssistOutcome::NoAction(NoActionReason::DeckFull) => {
                write!(f, "No action taken: the main deck is already full")
            }
            AssistOutcome::NoAction(NoActionReason::AlreadyBalanced) => {
                write!(f, "No action taken: the deck is already well balanced")
            }
            AssistOutcome::NoAction(NoActionReason::NoCandidates) => {
                write!(f, "No action taken: no eligible cards in the catalog")
            }
        }
    }
}

/// The selected leader and base, resolved against the catalog.
pub(crate) fn selected_pair<'a>(
    deck: &DeckComposition,
    catalog: &'a CardCatalog,
) -> Result<(&'a Card, &'a Card), AssistError> {
    let leader_id = deck.leader_id().ok_or(AssistError::LeaderMissing)?;
    let base_id = deck.base_id().ok_or(AssistError::BaseMissing)?;
    let leader = catalog
        .get(leader_id)
        .ok_or_else(|| AssistError::UnknownLeader(leader_id.clone()))?;
    let base = catalog
        .get(base_id)
        .ok_or_else(|| AssistError::UnknownBase(base_id.clone()))?;
    check_slot_type(leader, CardType::Leader)?;
    check_slot_type(base, CardType::Base)?;
    Ok((leader, base))
}

fn check_slot_type(card: &Card, expected: CardType) -> Result<(), DeckError> {
    if card.card_type == expected {
        return Ok(());
    }
    Err(DeckError::WrongCardType {
        id: card.id.clone(),
        expected,
        found: card.card_type,
    })
}

/// Aspects shared by leader and base; fails unless there is at least one.
pub(crate) fn required_shared_aspects(
    deck: &DeckComposition,
    catalog: &CardCatalog,
) -> Result<AspectSet, AssistError> {
    let (leader, base) = selected_pair(deck, catalog)?;
    let shared = leader.aspect_set().intersection(base.aspect_set());
    if shared.is_empty() {
        return Err(AssistError::NoSharedAspects);
    }
    Ok(shared)
}

/// Main-deck slots left before the minimum size is reached.
pub(crate) fn remaining_capacity(deck: &DeckComposition, rules: &DeckRules) -> u32 {
    rules
        .min_main_cards
        .saturating_sub(deck.total_count(Ledger::Main))
}

/// Adds up to `wanted` copies of `card` to the main deck within both ceilings.
///
/// Returns the number of copies added.
pub(crate) fn add_copies(
    deck: &mut DeckComposition,
    card: &Card,
    wanted: u32,
    rules: &DeckRules,
) -> u32 {
    let current = deck.card_count(&card.id, Ledger::Main);
    let to_add = wanted
        .min(rules.max_copies.saturating_sub(current))
        .min(remaining_capacity(deck, rules));
    if to_add > 0 {
        deck.set_entry_count(card.id.clone(), current + to_add, Ledger::Main);
    }
    to_add
}
