//! Aggregation over deck ledgers.
//!
//! Every function here is pure and total: it accepts any composition and any
//! catalog, and cards that do not resolve in the catalog are skipped rather
//! than reported. Reporting unknown cards is the validator's job.

use std::collections::BTreeMap;

use crate::aspect::Aspect;
use crate::catalog::CardLookup;
use crate::deck::DeckComposition;
use crate::ids::CardId;
use crate::ledger::Ledger;
use crate::types::CardType;

/// Physical card totals for each ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize))]
pub struct LedgerTotals {
    pub main: u32,
    pub side: u32,
    pub overflow: u32,
}

impl LedgerTotals {
    pub fn of(deck: &DeckComposition) -> Self {
        Self {
            main: deck.total_count(Ledger::Main),
            side: deck.total_count(Ledger::Side),
            overflow: deck.total_count(Ledger::Overflow),
        }
    }

    pub fn get(&self, ledger: Ledger) -> u32 {
        match ledger {
            Ledger::Main => self.main,
            Ledger::Side => self.side,
            Ledger::Overflow => self.overflow,
        }
    }
}

/// Sum of counts over one ledger.
pub fn total_count(deck: &DeckComposition, ledger: Ledger) -> u32 {
    deck.total_count(ledger)
}

/// Card id -> count for one ledger.
pub fn copy_counts(deck: &DeckComposition, ledger: Ledger) -> BTreeMap<CardId, u32> {
    deck.ledger(ledger).clone()
}

/// Copy counts per aspect, covering all six aspects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AspectCounts([u32; 6]);

impl AspectCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, aspect: Aspect) -> u32 {
        self.0[aspect.index()]
    }

    pub fn add(&mut self, aspect: Aspect, count: u32) {
        let total = &mut self.0[aspect.index()];
        *total = total.saturating_add(count);
    }

    /// Iterates (aspect, count) pairs in canonical aspect order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (Aspect, u32)> + '_ {
        Aspect::ALL.into_iter().map(|aspect| (aspect, self.get(aspect)))
    }
}

#[cfg(feature = "serialization")]
impl serde::Serialize for AspectCounts {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(Aspect::ALL.len()))?;
        for (aspect, count) in self.iter() {
            map.serialize_entry(aspect.as_str(), &count)?;
        }
        map.end()
    }
}

/// Adds each entry's count to every aspect of its card.
///
/// A card with two aspects therefore contributes to both totals.
pub fn aspect_totals<L: CardLookup + ?Sized>(
    deck: &DeckComposition,
    ledger: Ledger,
    catalog: &L,
) -> AspectCounts {
    let mut totals = AspectCounts::new();
    for (card_id, count) in deck.iter_entries(ledger) {
        let Some(card) = catalog.lookup(card_id) else {
            continue;
        };
        for aspect in &card.aspects {
            totals.add(*aspect, count);
        }
    }
    totals
}

/// Copies per cost bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize))]
pub struct CostCurve {
    /// `buckets[c]` counts copies costing `c`; the last bucket also holds
    /// everything costing more.
    pub buckets: Vec<u32>,
    /// Copies of resolved cards with no cost, left out of the buckets.
    pub uncosted: u32,
}

impl CostCurve {
    pub fn max_bucket(&self) -> u32 {
        self.buckets.len().saturating_sub(1) as u32
    }

    /// Copies counted in the buckets.
    pub fn total(&self) -> u32 {
        self.buckets
            .iter()
            .fold(0, |total, &count| total.saturating_add(count))
    }

    pub fn count_at(&self, cost: u32) -> u32 {
        let index = cost.min(self.max_bucket()) as usize;
        self.buckets.get(index).copied().unwrap_or(0)
    }
}

/// Buckets one ledger's copies by cost, `max_bucket` and above collapsed.
///
/// Cards without a cost are excluded explicitly (tallied in
/// [`CostCurve::uncosted`]) rather than treated as cost 0.
pub fn cost_curve<L: CardLookup + ?Sized>(
    deck: &DeckComposition,
    ledger: Ledger,
    catalog: &L,
    max_bucket: u32,
) -> CostCurve {
    let mut curve = CostCurve {
        buckets: vec![0; max_bucket as usize + 1],
        uncosted: 0,
    };
    for (card_id, count) in deck.iter_entries(ledger) {
        let Some(card) = catalog.lookup(card_id) else {
            continue;
        };
        let bucket = match card.cost {
            Some(cost) => &mut curve.buckets[cost.min(max_bucket) as usize],
            None => &mut curve.uncosted,
        };
        *bucket = bucket.saturating_add(count);
    }
    curve
}

/// Copies per card type for one ledger.
pub fn type_counts<L: CardLookup + ?Sized>(
    deck: &DeckComposition,
    ledger: Ledger,
    catalog: &L,
) -> BTreeMap<CardType, u32> {
    let mut counts = BTreeMap::new();
    for (card_id, count) in deck.iter_entries(ledger) {
        if let Some(card) = catalog.lookup(card_id) {
            let total = counts.entry(card.card_type).or_insert(0u32);
            *total = total.saturating_add(count);
        }
    }
    counts
}
