use crate::deck::DeckComposition;
use crate::ids::CardId;
use crate::ledger::Ledger;

/// Removes every entry from the main deck.
///
/// Returns the number of copies removed. Side and overflow are untouched.
pub fn clear_main(deck: &mut DeckComposition) -> u32 {
    let removed = deck.total_count(Ledger::Main);
    let ids: Vec<CardId> = deck.ledger(Ledger::Main).keys().cloned().collect();
    for id in ids {
        deck.set_entry_count(id, 0, Ledger::Main);
    }
    tracing::debug!(removed, "cleared main deck");
    removed
}
