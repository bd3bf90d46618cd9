//! Line-oriented decklist format.
//!
//! ```text
//! Leader: Luke Skywalker
//! Base: Echo Base
//!
//! Main Deck:
//! 3 Alliance X-Wing
//! 2 Battlefield Marine
//!
//! Sideboard:
//! 1 Vanquish
//! ```
//!
//! Section headers are exactly `Main Deck:`, `Sideboard:` and `Overflow:`.
//! Entries are `<count> <name>`, sorted by name within a section, ignoring
//! case first.

use crate::card::Card;
use crate::catalog::{CardCatalog, CardLookup};
use crate::deck::{DeckComposition, DeckError};
use crate::ids::CardId;
use crate::ledger::Ledger;

const LEADER_PREFIX: &str = "Leader:";
const BASE_PREFIX: &str = "Base:";

/// Render a deck as a plain-text decklist.
///
/// Leader and base lines appear only when they resolve in the catalog. The
/// main section is always present; sideboard and overflow only when their
/// ledger has entries. Entries whose card is unknown are omitted.
pub fn export_plain_text<L: CardLookup + ?Sized>(deck: &DeckComposition, catalog: &L) -> String {
    let mut lines: Vec<String> = Vec::new();

    let leader = deck.leader_id().and_then(|id| catalog.lookup(id));
    let base = deck.base_id().and_then(|id| catalog.lookup(id));
    if let Some(leader) = leader {
        lines.push(format!("{LEADER_PREFIX} {}", leader.name));
    }
    if let Some(base) = base {
        lines.push(format!("{BASE_PREFIX} {}", base.name));
    }
    if leader.is_some() || base.is_some() {
        lines.push(String::new());
    }

    lines.push(Ledger::Main.section_header().to_string());
    push_entries(&mut lines, deck, Ledger::Main, catalog);

    for ledger in [Ledger::Side, Ledger::Overflow] {
        if deck.ledger(ledger).is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(ledger.section_header().to_string());
        push_entries(&mut lines, deck, ledger, catalog);
    }

    lines.join("\n")
}

fn push_entries<L: CardLookup + ?Sized>(
    lines: &mut Vec<String>,
    deck: &DeckComposition,
    ledger: Ledger,
    catalog: &L,
) {
    let mut resolved: Vec<(&Card, u32)> = deck
        .iter_entries(ledger)
        .filter_map(|(card_id, count)| catalog.lookup(card_id).map(|card| (card, count)))
        .collect();
    resolved.sort_by_cached_key(|&(card, _)| (card.name.to_lowercase(), &card.name, &card.id));
    lines.extend(
        resolved
            .into_iter()
            .map(|(card, count)| format!("{count} {}", card.name)),
    );
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecklistError {
    #[error("line {line}: card entry appears before any section header")]
    EntryOutsideSection { line: usize },
    #[error("line {line}: expected `<count> <card name>`, found {text:?}")]
    MalformedEntry { line: usize, text: String },
    #[error("line {line}: invalid card count {count:?}")]
    InvalidCount { line: usize, count: String },
    #[error("line {line}: no card named {name:?} in the catalog")]
    UnknownCard { line: usize, name: String },
    #[error("line {line}: {source}")]
    WrongSlot {
        line: usize,
        #[source]
        source: DeckError,
    },
}

/// Parse a plain-text decklist back into a deck.
///
/// Names are resolved case-insensitively against the catalog. Repeated
/// entries for the same card in one section are added together.
pub fn parse_plain_text(
    text: &str,
    catalog: &CardCatalog,
) -> Result<DeckComposition, DecklistError> {
    let mut deck = DeckComposition::new();
    let mut section: Option<Ledger> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(ledger) = Ledger::from_section_header(line) {
            section = Some(ledger);
            continue;
        }

        if let Some(name) = line.strip_prefix(LEADER_PREFIX) {
            let card = resolve(catalog, name.trim(), line_no)?;
            deck.set_leader(Some(card))
                .map_err(|source| DecklistError::WrongSlot { line: line_no, source })?;
            continue;
        }
        if let Some(name) = line.strip_prefix(BASE_PREFIX) {
            let card = resolve(catalog, name.trim(), line_no)?;
            deck.set_base(Some(card))
                .map_err(|source| DecklistError::WrongSlot { line: line_no, source })?;
            continue;
        }

        let Some(ledger) = section else {
            return Err(DecklistError::EntryOutsideSection { line: line_no });
        };
        let (count, name) = parse_entry(line, line_no)?;
        let card = resolve(catalog, name, line_no)?;
        add_count(&mut deck, &card.id, count, ledger);
    }

    tracing::debug!(
        main = deck.total_count(Ledger::Main),
        side = deck.total_count(Ledger::Side),
        overflow = deck.total_count(Ledger::Overflow),
        "parsed decklist"
    );
    Ok(deck)
}

fn parse_entry(line: &str, line_no: usize) -> Result<(u32, &str), DecklistError> {
    let Some((count, name)) = line.split_once(char::is_whitespace) else {
        return Err(DecklistError::MalformedEntry {
            line: line_no,
            text: line.to_string(),
        });
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(DecklistError::MalformedEntry {
            line: line_no,
            text: line.to_string(),
        });
    }
    let count = count
        .parse::<u32>()
        .map_err(|_| DecklistError::InvalidCount {
            line: line_no,
            count: count.to_string(),
        })?;
    Ok((count, name))
}

fn resolve<'a>(
    catalog: &'a CardCatalog,
    name: &str,
    line_no: usize,
) -> Result<&'a Card, DecklistError> {
    catalog
        .get_by_name(name)
        .ok_or_else(|| DecklistError::UnknownCard {
            line: line_no,
            name: name.to_string(),
        })
}

fn add_count(deck: &mut DeckComposition, card_id: &CardId, count: u32, ledger: Ledger) {
    let current = deck.card_count(card_id, ledger);
    deck.set_entry_count(card_id.clone(), current.saturating_add(count), ledger);
}
