use rand::Rng;
use rand::seq::SliceRandom;

use super::clear::clear_main;
use super::{AssistError, AssistOutcome, add_copies, remaining_capacity, required_shared_aspects};
use crate::card::Card;
use crate::catalog::CardCatalog;
use crate::deck::DeckComposition;
use crate::rules::DeckRules;

/// Replace the main deck with a random aspect-compatible one.
pub fn random_deck<R: Rng + ?Sized>(
    deck: &mut DeckComposition,
    catalog: &CardCatalog,
    rng: &mut R,
) -> Result<AssistOutcome, AssistError> {
    random_deck_with_rules(deck, catalog, &DeckRules::default(), rng)
}

/// Clear the main deck, then add each shuffled candidate with a random copy
/// count in `1..=max_copies` until the minimum size is reached.
///
/// Preconditions are checked before clearing. Once they hold, the main deck is
/// cleared even when no candidate is eligible, leaving it empty.
pub fn random_deck_with_rules<R: Rng + ?Sized>(
    deck: &mut DeckComposition,
    catalog: &CardCatalog,
    rules: &DeckRules,
    rng: &mut R,
) -> Result<AssistOutcome, AssistError> {
    let shared = required_shared_aspects(deck, catalog)?;

    clear_main(deck);

    let mut pool: Vec<&Card> = catalog
        .playable()
        .filter(|card| card.shares_aspect_with(shared))
        .collect();
    pool.shuffle(rng);
    tracing::debug!(candidates = pool.len(), "building random main deck");

    let mut added = 0;
    for card in pool {
        if rules.max_copies == 0 || remaining_capacity(deck, rules) == 0 {
            break;
        }
        let copies = rng.random_range(1..=rules.max_copies);
        added += add_copies(deck, card, copies, rules);
    }

    tracing::debug!(added, "random deck finished");
    Ok(AssistOutcome::Added(added))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspect::Aspect;
    use crate::card::CardBuilder;
    use crate::ids::CardId;
    use crate::types::CardType;
    use crate::ledger::Ledger;
    use crate::tests::fixtures;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_deck_replaces_main() {
        let catalog = fixtures::catalog();
        let mut deck = fixtures::deck(&catalog, fixtures::LEADER_HV, fixtures::BASE_HV);
        deck.set_entry_count("X01", 3, Ledger::Main);
        deck.set_entry_count("X02", 2, Ledger::Side);

        let outcome = random_deck(&mut deck, &catalog, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(outcome, AssistOutcome::Added(50));
        assert_eq!(deck.total_count(Ledger::Main), 50);
        assert_eq!(deck.card_count(&CardId::from("X01"), Ledger::Main), 0);
        assert_eq!(deck.card_count(&CardId::from("X02"), Ledger::Side), 2);
        for (card_id, count) in deck.iter_entries(Ledger::Main) {
            assert!((1..=3).contains(&count));
            let card = catalog.get(card_id).unwrap();
            assert!(card.has_aspect(Aspect::Heroism) || card.has_aspect(Aspect::Vigilance));
        }
    }

    #[test]
    fn test_random_deck_is_reproducible_with_seed() {
        let catalog = fixtures::catalog();
        let start = fixtures::deck(&catalog, fixtures::LEADER_HV, fixtures::BASE_HV);

        let mut a = start.clone();
        let mut b = start.clone();
        random_deck(&mut a, &catalog, &mut StdRng::seed_from_u64(100)).unwrap();
        random_deck(&mut b, &catalog, &mut StdRng::seed_from_u64(100)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_deck_failure_leaves_deck_untouched() {
        let catalog = fixtures::catalog();
        let mut deck = fixtures::deck(&catalog, fixtures::LEADER_HV, fixtures::BASE_C);
        deck.set_entry_count("H01", 2, Ledger::Main);
        let before = deck.clone();
        let err =
            random_deck(&mut deck, &catalog, &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert_eq!(err, AssistError::NoSharedAspects);
        assert_eq!(deck, before);
    }

    #[test]
    fn test_random_deck_clears_main_without_candidates() {
        let catalog = CardCatalog::from_cards([
            CardBuilder::new("L", "Test Leader")
                .card_type(CardType::Leader)
                .aspects([Aspect::Command])
                .build(),
            CardBuilder::new("B", "Test Base")
                .card_type(CardType::Base)
                .aspects([Aspect::Command])
                .build(),
            CardBuilder::new("U", "Off-Aspect Unit")
                .cost(2)
                .aspects([Aspect::Cunning])
                .build(),
        ]);
        let mut deck = DeckComposition::from_slots(Some("L".into()), Some("B".into()));
        deck.set_entry_count("U", 3, Ledger::Main);
        deck.set_entry_count("U", 1, Ledger::Side);

        let outcome = random_deck(&mut deck, &catalog, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(outcome, AssistOutcome::Added(0));
        assert_eq!(deck.total_count(Ledger::Main), 0);
        assert_eq!(deck.card_count(&CardId::from("U"), Ledger::Side), 1);
    }
}
