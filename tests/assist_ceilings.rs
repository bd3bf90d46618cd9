use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use swudeck::assist::{auto_fill, balance_aspects, random_deck};
use swudeck::{
    Aspect, AssistOutcome, CardBuilder, CardCatalog, CardType, DeckComposition, Ledger,
};

fn catalog() -> CardCatalog {
    let mut cards = vec![
        CardBuilder::new("leader", "Han Solo")
            .card_type(CardType::Leader)
            .aspects([Aspect::Cunning, Aspect::Heroism])
            .build(),
        CardBuilder::new("base", "Tarkintown")
            .card_type(CardType::Base)
            .aspects([Aspect::Cunning, Aspect::Heroism])
            .build(),
    ];
    let aspects = [Aspect::Cunning, Aspect::Heroism, Aspect::Command];
    cards.extend((0..30).map(|n| {
        CardBuilder::new(format!("c{n:02}"), format!("Card {n:02}"))
            .aspects([aspects[n % 3]])
            .cost(n as u32 % 7)
            .build()
    }));
    CardCatalog::from_cards(cards)
}

/// Main-deck counts to start from, each within the copy limit.
fn prefill_strategy() -> impl Strategy<Value = Vec<(usize, u32)>> {
    prop::collection::vec((0usize..30, 1u32..=3), 0..12)
}

fn start_deck(catalog: &CardCatalog, prefill: &[(usize, u32)]) -> DeckComposition {
    let mut deck = DeckComposition::new();
    deck.set_leader(catalog.get(&"leader".into())).unwrap();
    deck.set_base(catalog.get(&"base".into())).unwrap();
    for &(card, count) in prefill {
        deck.set_entry_count(format!("c{card:02}"), count, Ledger::Main);
    }
    deck
}

fn assert_within_ceilings(deck: &DeckComposition) -> Result<(), TestCaseError> {
    prop_assert!(deck.total_count(Ledger::Main) <= 50);
    for (card_id, count) in deck.iter_entries(Ledger::Main) {
        prop_assert!(count <= 3, "{} has {} copies", card_id, count);
    }
    Ok(())
}

proptest! {
    #[test]
    fn auto_fill_respects_ceilings(prefill in prefill_strategy(), seed in any::<u64>()) {
        let catalog = catalog();
        let mut deck = start_deck(&catalog, &prefill);
        let before = deck.total_count(Ledger::Main);

        let outcome = auto_fill(&mut deck, &catalog, &mut StdRng::seed_from_u64(seed)).unwrap();

        assert_within_ceilings(&deck)?;
        // Twenty compatible cards always have room for the rest.
        prop_assert_eq!(deck.total_count(Ledger::Main), 50);
        prop_assert_eq!(outcome.added(), 50 - before);
    }

    #[test]
    fn random_deck_respects_ceilings(prefill in prefill_strategy(), seed in any::<u64>()) {
        let catalog = catalog();
        let mut deck = start_deck(&catalog, &prefill);

        random_deck(&mut deck, &catalog, &mut StdRng::seed_from_u64(seed)).unwrap();

        assert_within_ceilings(&deck)?;
        for (card_id, _) in deck.iter_entries(Ledger::Main) {
            let card = catalog.get(card_id).unwrap();
            prop_assert!(!card.has_aspect(Aspect::Command));
        }
    }

    #[test]
    fn balance_respects_ceilings(prefill in prefill_strategy(), seed in any::<u64>()) {
        let catalog = catalog();
        let mut deck = start_deck(&catalog, &prefill);
        let before = deck.total_count(Ledger::Main);

        let outcome =
            balance_aspects(&mut deck, &catalog, &mut StdRng::seed_from_u64(seed)).unwrap();

        assert_within_ceilings(&deck)?;
        prop_assert_eq!(deck.total_count(Ledger::Main), before + outcome.added());
    }
}

#[test]
fn auto_fill_twice_reports_full_deck() {
    let catalog = catalog();
    let mut deck = start_deck(&catalog, &[]);
    let mut rng = StdRng::seed_from_u64(17);
    assert_eq!(
        auto_fill(&mut deck, &catalog, &mut rng).unwrap(),
        AssistOutcome::Added(50)
    );
    assert_eq!(
        auto_fill(&mut deck, &catalog, &mut rng).unwrap().added(),
        0
    );
}
