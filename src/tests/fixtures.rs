//! Shared card pool for in-crate tests.
//!
//! The pool has one Heroism/Vigilance leader, three bases, fifteen units for
//! each of Heroism and Vigilance, ten Villainy units and five dual-aspect
//! events. Ids double as the constants below (`"H01"`, `"V15"`, `"X03"`...).

use crate::aspect::Aspect;
use crate::card::{Card, CardBuilder};
use crate::catalog::CardCatalog;
use crate::deck::DeckComposition;
use crate::ids::CardId;
use crate::types::CardType;

pub const LEADER_HV: &str = "LEADER_HV";
/// Heroism only.
pub const BASE_H: &str = "BASE_H";
/// Heroism and Vigilance.
pub const BASE_HV: &str = "BASE_HV";
/// Command only; shares nothing with `LEADER_HV`.
pub const BASE_C: &str = "BASE_C";

fn unit(prefix: &str, label: &str, n: u32, aspect: Aspect) -> Card {
    CardBuilder::new(format!("{prefix}{n:02}"), format!("{label} {n:02}"))
        .set("TST", format!("{n:03}"))
        .aspects([aspect])
        .cost(1 + n % 7)
        .stats(2, 3)
        .build()
}

pub fn catalog() -> CardCatalog {
    let mut cards = vec![
        CardBuilder::new(LEADER_HV, "Rebel Commander")
            .card_type(CardType::Leader)
            .aspects([Aspect::Heroism, Aspect::Vigilance])
            .unique()
            .build(),
        CardBuilder::new(BASE_H, "Echo Base")
            .card_type(CardType::Base)
            .aspects([Aspect::Heroism])
            .build(),
        CardBuilder::new(BASE_HV, "Jedi Temple")
            .card_type(CardType::Base)
            .aspects([Aspect::Heroism, Aspect::Vigilance])
            .build(),
        CardBuilder::new(BASE_C, "Command Center")
            .card_type(CardType::Base)
            .aspects([Aspect::Command])
            .build(),
    ];
    cards.extend((1..=15).map(|n| unit("H", "Heroic Trooper", n, Aspect::Heroism)));
    cards.extend((1..=15).map(|n| unit("V", "Vigilant Guard", n, Aspect::Vigilance)));
    cards.extend((1..=10).map(|n| unit("X", "Imperial Agent", n, Aspect::Villainy)));
    cards.extend((1..=5).map(|n| {
        CardBuilder::new(format!("HV{n:02}"), format!("Rally {n:02}"))
            .card_type(CardType::Event)
            .aspects([Aspect::Heroism, Aspect::Vigilance])
            .cost(n)
            .text("Draw a card.")
            .build()
    }));
    CardCatalog::from_cards(cards)
}

/// A deck with the given leader and base selected and empty ledgers.
pub fn deck(catalog: &CardCatalog, leader_id: &str, base_id: &str) -> DeckComposition {
    let mut deck = DeckComposition::new();
    deck.set_leader(catalog.get(&CardId::from(leader_id)))
        .expect("fixture leader");
    deck.set_base(catalog.get(&CardId::from(base_id)))
        .expect("fixture base");
    deck
}
