use rand::Rng;
use rand::seq::IndexedRandom;

use super::{
    AssistError, AssistOutcome, NoActionReason, add_copies, remaining_capacity,
    required_shared_aspects,
};
use crate::aggregate::aspect_totals;
use crate::aspect::Aspect;
use crate::card::Card;
use crate::catalog::CardCatalog;
use crate::deck::DeckComposition;
use crate::ledger::Ledger;
use crate::rules::DeckRules;

/// Add cards for shared aspects that are underrepresented in the main deck.
pub fn balance_aspects<R: Rng + ?Sized>(
    deck: &mut DeckComposition,
    catalog: &CardCatalog,
    rng: &mut R,
) -> Result<AssistOutcome, AssistError> {
    balance_aspects_with_rules(deck, catalog, &DeckRules::default(), rng)
}

/// Each shared aspect's target is `min_main_cards / shared`; an aspect whose
/// copy total is below `balance_threshold` of the target is underrepresented.
/// For each such aspect, in canonical order, one eligible card is picked at
/// random and added up to the copy limit.
pub fn balance_aspects_with_rules<R: Rng + ?Sized>(
    deck: &mut DeckComposition,
    catalog: &CardCatalog,
    rules: &DeckRules,
    rng: &mut R,
) -> Result<AssistOutcome, AssistError> {
    let shared = required_shared_aspects(deck, catalog)?;

    let totals = aspect_totals(deck, Ledger::Main, catalog);
    let target = f64::from(rules.min_main_cards) / f64::from(shared.count());
    let underrepresented: Vec<Aspect> = shared
        .iter()
        .filter(|aspect| f64::from(totals.get(*aspect)) < target * rules.balance_threshold)
        .collect();

    if underrepresented.is_empty() {
        tracing::debug!("balance skipped: aspects already balanced");
        return Ok(AssistOutcome::NoAction(NoActionReason::AlreadyBalanced));
    }
    if remaining_capacity(deck, rules) == 0 {
        tracing::debug!("balance skipped: main deck already full");
        return Ok(AssistOutcome::NoAction(NoActionReason::DeckFull));
    }

    tracing::debug!(?underrepresented, target_share = target, "balancing aspects");

    let mut added = 0;
    for aspect in underrepresented {
        if remaining_capacity(deck, rules) == 0 {
            break;
        }
        let eligible: Vec<&Card> = catalog
            .playable()
            .filter(|card| card.has_aspect(aspect))
            .filter(|card| deck.card_count(&card.id, Ledger::Main) < rules.max_copies)
            .collect();
        let Some(card) = eligible.choose(rng) else {
            continue;
        };
        let copies = add_copies(deck, card, rules.max_copies, rules);
        tracing::debug!(%aspect, card = %card.id, copies, "added card for aspect");
        added += copies;
    }

    if added == 0 {
        return Ok(AssistOutcome::NoAction(NoActionReason::NoCandidates));
    }
    Ok(AssistOutcome::Added(added))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixtures;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_balance_adds_for_missing_aspect() {
        let catalog = fixtures::catalog();
        let mut deck = fixtures::deck(&catalog, fixtures::LEADER_HV, fixtures::BASE_HV);
        // 30 heroism copies, no vigilance: target 25, threshold 17.5.
        for i in 1..=10 {
            deck.set_entry_count(format!("H{i:02}"), 3, Ledger::Main);
        }

        let outcome =
            balance_aspects(&mut deck, &catalog, &mut StdRng::seed_from_u64(4)).unwrap();
        assert_eq!(outcome, AssistOutcome::Added(3));
        let totals = aspect_totals(&deck, Ledger::Main, &catalog);
        assert!(totals.get(Aspect::Vigilance) >= 3);
        assert_eq!(deck.total_count(Ledger::Main), 33);
    }

    #[test]
    fn test_balance_adds_for_each_underrepresented_aspect() {
        let catalog = fixtures::catalog();
        let mut deck = fixtures::deck(&catalog, fixtures::LEADER_HV, fixtures::BASE_HV);

        let outcome =
            balance_aspects(&mut deck, &catalog, &mut StdRng::seed_from_u64(8)).unwrap();
        // One card per shared aspect; a dual-aspect pick is no longer
        // eligible for the second aspect once at three copies.
        assert_eq!(outcome, AssistOutcome::Added(6));
        assert!(deck.iter_entries(Ledger::Main).all(|(_, count)| count <= 3));
    }

    #[test]
    fn test_balanced_deck_takes_no_action() {
        let catalog = fixtures::catalog();
        let mut deck = fixtures::deck(&catalog, fixtures::LEADER_HV, fixtures::BASE_HV);
        for i in 1..=7 {
            deck.set_entry_count(format!("H{i:02}"), 3, Ledger::Main);
            deck.set_entry_count(format!("V{i:02}"), 3, Ledger::Main);
        }
        let before = deck.clone();

        let outcome =
            balance_aspects(&mut deck, &catalog, &mut StdRng::seed_from_u64(4)).unwrap();
        assert_eq!(outcome, AssistOutcome::NoAction(NoActionReason::AlreadyBalanced));
        assert_eq!(deck, before);
    }

    #[test]
    fn test_balance_on_full_deck_takes_no_action() {
        let catalog = fixtures::catalog();
        let mut deck = fixtures::deck(&catalog, fixtures::LEADER_HV, fixtures::BASE_HV);
        for i in 1..=15 {
            deck.set_entry_count(format!("H{i:02}"), 3, Ledger::Main);
        }
        deck.set_entry_count("X01", 3, Ledger::Main);
        deck.set_entry_count("X02", 2, Ledger::Main);
        let before = deck.clone();

        let outcome =
            balance_aspects(&mut deck, &catalog, &mut StdRng::seed_from_u64(4)).unwrap();
        assert_eq!(outcome, AssistOutcome::NoAction(NoActionReason::DeckFull));
        assert_eq!(deck, before);
    }

    #[test]
    fn test_balance_requires_leader_and_base() {
        let catalog = fixtures::catalog();
        let mut deck = DeckComposition::new();
        let err =
            balance_aspects(&mut deck, &catalog, &mut StdRng::seed_from_u64(4)).unwrap_err();
        assert_eq!(err, AssistError::LeaderMissing);
    }
}
