//! End-to-end deck-building scenarios: a deck is assembled through the public
//! mutation interface, then validated, assisted and exported.

use super::fixtures::{self, BASE_C, BASE_H, BASE_HV, LEADER_HV};
use crate::assist::{self, AssistError, AssistOutcome};
use crate::export::{export_plain_text, parse_plain_text};
use crate::ids::CardId;
use crate::ledger::Ledger;
use crate::rules::{IssueCode, IssueDetails, validate};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Fills the main deck to exactly 50 with Heroism cards.
fn fill_heroism(deck: &mut crate::deck::DeckComposition) {
    for n in 1..=15 {
        deck.set_entry_count(format!("H{n:02}"), 3, Ledger::Main);
    }
    deck.set_entry_count("HV01", 3, Ledger::Main);
    deck.set_entry_count("HV02", 2, Ledger::Main);
}

#[test]
fn test_empty_deck_reports_missing_pieces() {
    let catalog = fixtures::catalog();
    let deck = crate::deck::DeckComposition::new();

    let report = validate(&deck, &catalog);
    assert!(!report.is_valid);
    assert_eq!(
        report.codes(),
        vec![
            IssueCode::LeaderMissing,
            IssueCode::BaseMissing,
            IssueCode::MainSizeUnderMin
        ]
    );
    let main_size = report
        .issues
        .iter()
        .find(|issue| issue.code == IssueCode::MainSizeUnderMin)
        .unwrap();
    assert_eq!(
        main_size.details,
        Some(IssueDetails::MainSize { have: 0, need: 50 })
    );
    assert_eq!(report.warnings().count(), 0);
    assert_eq!(
        (report.totals.main, report.totals.side, report.totals.overflow),
        (0, 0, 0)
    );
}

#[test]
fn test_full_single_aspect_deck_is_valid_with_warning() {
    let catalog = fixtures::catalog();
    let mut deck = fixtures::deck(&catalog, LEADER_HV, BASE_H);
    fill_heroism(&mut deck);
    assert_eq!(deck.total_count(Ledger::Main), 50);

    let report = validate(&deck, &catalog);
    assert!(report.is_valid);
    assert_eq!(report.codes(), vec![IssueCode::AspectLowDiversity]);
    assert!(!report.has(IssueCode::SideboardOverLimit));
}

#[test]
fn test_disjoint_aspects_are_always_invalid() {
    let catalog = fixtures::catalog();
    let mut deck = fixtures::deck(&catalog, LEADER_HV, BASE_C);
    fill_heroism(&mut deck);

    let report = validate(&deck, &catalog);
    assert!(!report.is_valid);
    assert!(report.has(IssueCode::AspectIncompatible));
}

#[test]
fn test_copy_ceiling_is_checked_on_loaded_decks() {
    let catalog = fixtures::catalog();
    let mut deck = fixtures::deck(&catalog, LEADER_HV, BASE_HV);
    deck.set_entry_count("x", 5, Ledger::Main);

    let report = validate(&deck, &catalog);
    let copies = report
        .issues
        .iter()
        .find(|issue| issue.code == IssueCode::CopiesOverLimit)
        .unwrap();
    assert_eq!(
        copies.details,
        Some(IssueDetails::Copies {
            card_id: CardId::from("x"),
            count: 5
        })
    );
    assert!(copies.is_error());
}

#[test]
fn test_reaching_fifty_makes_the_deck_valid() {
    let catalog = fixtures::catalog();
    let mut deck = fixtures::deck(&catalog, LEADER_HV, BASE_HV);
    fill_heroism(&mut deck);
    deck.set_entry_count("HV02", 1, Ledger::Main);
    assert!(!validate(&deck, &catalog).is_valid);

    deck.set_entry_count("HV02", 2, Ledger::Main);
    let report = validate(&deck, &catalog);
    assert!(report.is_valid);
    assert!(report.issues.is_empty());
}

#[test]
fn test_overfull_sideboard_warns_until_moved_to_overflow() {
    let catalog = fixtures::catalog();
    let mut deck = fixtures::deck(&catalog, LEADER_HV, BASE_HV);
    fill_heroism(&mut deck);
    for n in 1..=4 {
        deck.set_entry_count(format!("V{n:02}"), 3, Ledger::Side);
    }

    let report = validate(&deck, &catalog);
    assert!(report.is_valid);
    assert!(report.has(IssueCode::SideboardOverLimit));

    let moved = deck.move_entries(&CardId::from("V04"), 3, Ledger::Side, Ledger::Overflow);
    assert_eq!(moved, 3);
    let report = validate(&deck, &catalog);
    assert!(!report.has(IssueCode::SideboardOverLimit));
    assert_eq!(report.totals.overflow, 3);
}

#[test]
fn test_auto_fill_produces_a_valid_deck() {
    let catalog = fixtures::catalog();
    let mut deck = fixtures::deck(&catalog, LEADER_HV, BASE_HV);
    let mut rng = StdRng::seed_from_u64(2024);

    let outcome = assist::auto_fill(&mut deck, &catalog, &mut rng).unwrap();
    assert_eq!(outcome, AssistOutcome::Added(50));
    assert!(validate(&deck, &catalog).is_valid);
}

#[test]
fn test_assist_refuses_incompatible_pair_without_mutation() {
    let catalog = fixtures::catalog();
    let mut deck = fixtures::deck(&catalog, LEADER_HV, BASE_C);
    deck.set_entry_count("H01", 1, Ledger::Main);
    let before = deck.clone();
    let mut rng = StdRng::seed_from_u64(1);

    assert_eq!(
        assist::auto_fill(&mut deck, &catalog, &mut rng),
        Err(AssistError::NoSharedAspects)
    );
    assert_eq!(
        assist::random_deck(&mut deck, &catalog, &mut rng),
        Err(AssistError::NoSharedAspects)
    );
    assert_eq!(
        assist::balance_aspects(&mut deck, &catalog, &mut rng),
        Err(AssistError::NoSharedAspects)
    );
    assert_eq!(deck, before);
}

#[test]
fn test_plain_text_export_reimports() {
    let catalog = fixtures::catalog();
    let mut deck = fixtures::deck(&catalog, LEADER_HV, BASE_HV);
    fill_heroism(&mut deck);
    deck.set_entry_count("V01", 2, Ledger::Side);
    deck.set_entry_count("X01", 1, Ledger::Overflow);

    let text = export_plain_text(&deck, &catalog);
    let parsed = parse_plain_text(&text, &catalog).unwrap();
    assert_eq!(parsed, deck);
}
