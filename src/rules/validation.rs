//! Deck validation.
//!
//! Validation never fails: every construction problem becomes an [`Issue`] in
//! the report, even for a wildly invalid deck. Rules are checked in a fixed
//! order and issues are reported in that order:
//!
//! 1. leader selected
//! 2. base selected
//! 3. every ledger entry resolves in the catalog (main, side, overflow)
//! 4. main deck meets the minimum size
//! 5. no card exceeds the copy limit in the main deck
//! 6. sideboard within its limit
//! 7. leader and base share an aspect
//! 8. leader and base share more than one aspect

use crate::aggregate::LedgerTotals;
use crate::aspect::AspectSet;
use crate::card::Card;
use crate::catalog::CardLookup;
use crate::deck::DeckComposition;
use crate::ids::CardId;
use crate::ledger::Ledger;
use crate::types::CardType;

use super::DeckRules;
use super::issue::{Issue, IssueCode, IssueDetails};

/// Result of validating a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct ValidationReport {
    /// True iff no issue has error severity.
    pub is_valid: bool,
    pub issues: Vec<Issue>,
    pub totals: LedgerTotals,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| issue.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| issue.is_warning())
    }

    pub fn has(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|issue| issue.code == code)
    }

    pub fn codes(&self) -> Vec<IssueCode> {
        self.issues.iter().map(|issue| issue.code).collect()
    }
}

/// Validate a deck against the default construction rules.
pub fn validate<L: CardLookup + ?Sized>(deck: &DeckComposition, catalog: &L) -> ValidationReport {
    validate_with_rules(deck, catalog, &DeckRules::default())
}

pub fn validate_with_rules<L: CardLookup + ?Sized>(
    deck: &DeckComposition,
    catalog: &L,
    rules: &DeckRules,
) -> ValidationReport {
    let mut issues = Vec::new();
    let totals = LedgerTotals::of(deck);

    if deck.leader_id().is_none() {
        issues.push(Issue::new(IssueCode::LeaderMissing, "Leader not selected."));
    } else if let Some(card) = wrong_slot_card(deck.leader_id(), catalog, CardType::Leader) {
        issues.push(Issue::new(
            IssueCode::LeaderMissing,
            format!("{} is not a leader.", card.name),
        ));
    }
    if deck.base_id().is_none() {
        issues.push(Issue::new(IssueCode::BaseMissing, "Base not selected."));
    } else if let Some(card) = wrong_slot_card(deck.base_id(), catalog, CardType::Base) {
        issues.push(Issue::new(
            IssueCode::BaseMissing,
            format!("{} is not a base.", card.name),
        ));
    }

    check_unknown_cards(deck, catalog, &mut issues);

    if totals.main < rules.min_main_cards {
        issues.push(
            Issue::new(
                IssueCode::MainSizeUnderMin,
                format!(
                    "Main deck has {}/{} cards.",
                    totals.main, rules.min_main_cards
                ),
            )
            .with_details(IssueDetails::MainSize {
                have: totals.main,
                need: rules.min_main_cards,
            }),
        );
    }

    check_copy_limit(deck, catalog, rules, &mut issues);

    if totals.side > rules.sideboard_limit {
        issues.push(
            Issue::new(
                IssueCode::SideboardOverLimit,
                format!(
                    "Sideboard has {}/{} cards. Excess should be moved to Overflow.",
                    totals.side, rules.sideboard_limit
                ),
            )
            .with_details(IssueDetails::Sideboard {
                total: totals.side,
                limit: rules.sideboard_limit,
            }),
        );
    }

    if let Some(shared) = shared_aspects(deck, catalog) {
        match shared.count() {
            0 => issues.push(Issue::new(
                IssueCode::AspectIncompatible,
                "Leader and base share no aspects.",
            )),
            1 => issues.push(Issue::new(
                IssueCode::AspectLowDiversity,
                "Leader and base share only one aspect.",
            )),
            _ => {}
        }
    }

    let is_valid = !issues.iter().any(Issue::is_error);
    ValidationReport {
        is_valid,
        issues,
        totals,
    }
}

fn check_unknown_cards<L: CardLookup + ?Sized>(
    deck: &DeckComposition,
    catalog: &L,
    issues: &mut Vec<Issue>,
) {
    for ledger in Ledger::ALL {
        for (card_id, _) in deck.iter_entries(ledger) {
            if catalog.contains(card_id) {
                continue;
            }
            issues.push(
                Issue::new(IssueCode::UnknownCard, format!("Unknown card {card_id}"))
                    .with_details(IssueDetails::UnknownCard {
                        ledger,
                        card_id: card_id.clone(),
                    }),
            );
        }
    }
}

fn check_copy_limit<L: CardLookup + ?Sized>(
    deck: &DeckComposition,
    catalog: &L,
    rules: &DeckRules,
    issues: &mut Vec<Issue>,
) {
    for (card_id, count) in deck.iter_entries(Ledger::Main) {
        if count <= rules.max_copies {
            continue;
        }
        let name = catalog.name_of(card_id).unwrap_or(card_id.as_str());
        issues.push(
            Issue::new(
                IssueCode::CopiesOverLimit,
                format!(
                    "{name} has {count}/{} copies in main deck.",
                    rules.max_copies
                ),
            )
            .with_details(IssueDetails::Copies {
                card_id: card_id.clone(),
                count,
            }),
        );
    }
}

/// The card in a slot when it resolves to something other than `expected`.
///
/// Decks loaded from JSON carry bare ids, so the type check `set_leader` and
/// `set_base` apply has to be repeated against the catalog.
fn wrong_slot_card<'a, L: CardLookup + ?Sized>(
    id: Option<&CardId>,
    catalog: &'a L,
    expected: CardType,
) -> Option<&'a Card> {
    catalog
        .lookup(id?)
        .filter(|card| card.card_type != expected)
}

/// Aspects shared by the selected leader and base.
///
/// `None` when either slot is empty, does not resolve in the catalog, or holds
/// a card of the wrong type; the aspect checks are skipped in that case.
pub(crate) fn shared_aspects<L: CardLookup + ?Sized>(
    deck: &DeckComposition,
    catalog: &L,
) -> Option<AspectSet> {
    let leader_id = deck.leader_id()?;
    let base_id = deck.base_id()?;
    let Some(leader) = catalog.lookup(leader_id) else {
        tracing::warn!(leader = %leader_id, "selected leader is not in the catalog");
        return None;
    };
    let Some(base) = catalog.lookup(base_id) else {
        tracing::warn!(base = %base_id, "selected base is not in the catalog");
        return None;
    };
    if leader.card_type != CardType::Leader || base.card_type != CardType::Base {
        return None;
    }
    Some(leader.aspect_set().intersection(base.aspect_set()))
}
