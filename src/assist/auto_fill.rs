use rand::Rng;
use rand::seq::SliceRandom;

use super::{
    AssistError, AssistOutcome, NoActionReason, add_copies, remaining_capacity,
    required_shared_aspects,
};
use crate::card::Card;
use crate::catalog::CardCatalog;
use crate::deck::DeckComposition;
use crate::ledger::Ledger;
use crate::rules::DeckRules;

/// Fill the main deck up to the minimum size with aspect-compatible cards.
pub fn auto_fill<R: Rng + ?Sized>(
    deck: &mut DeckComposition,
    catalog: &CardCatalog,
    rng: &mut R,
) -> Result<AssistOutcome, AssistError> {
    auto_fill_with_rules(deck, catalog, &DeckRules::default(), rng)
}

/// Fill the main deck up to `rules.min_main_cards`.
///
/// Candidates are playable cards sharing an aspect with both leader and base
/// that are not yet at the copy limit. They are visited in random order and
/// each is topped up to the copy limit until the deck is full.
pub fn auto_fill_with_rules<R: Rng + ?Sized>(
    deck: &mut DeckComposition,
    catalog: &CardCatalog,
    rules: &DeckRules,
    rng: &mut R,
) -> Result<AssistOutcome, AssistError> {
    let shared = required_shared_aspects(deck, catalog)?;

    let capacity = remaining_capacity(deck, rules);
    if capacity == 0 {
        tracing::debug!("auto-fill skipped: main deck already full");
        return Ok(AssistOutcome::NoAction(NoActionReason::DeckFull));
    }

    let mut pool: Vec<&Card> = catalog
        .playable()
        .filter(|card| card.shares_aspect_with(shared))
        .filter(|card| deck.card_count(&card.id, Ledger::Main) < rules.max_copies)
        .collect();
    if pool.is_empty() {
        tracing::debug!("auto-fill skipped: no candidates");
        return Ok(AssistOutcome::NoAction(NoActionReason::NoCandidates));
    }
    pool.shuffle(rng);

    tracing::debug!(capacity, candidates = pool.len(), "auto-filling main deck");

    let mut added = 0;
    for card in pool {
        if remaining_capacity(deck, rules) == 0 {
            break;
        }
        added += add_copies(deck, card, rules.max_copies, rules);
    }

    tracing::debug!(added, "auto-fill finished");
    Ok(AssistOutcome::Added(added))
}
