//! Main-deck statistics: cost curve, aspect and type distribution, and a
//! coarse grade for the shape of the curve.

use std::collections::BTreeMap;
use std::fmt;

use crate::aggregate::{AspectCounts, CostCurve, aspect_totals, cost_curve, type_counts};
use crate::catalog::CardLookup;
use crate::deck::DeckComposition;
use crate::ledger::Ledger;
use crate::rules::DeckRules;
use crate::types::CardType;

/// Highest cost counted as early game.
pub const LOW_COST_MAX: u32 = 2;
/// Lowest cost counted as late game.
pub const HIGH_COST_MIN: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum CurveQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl CurveQuality {
    /// Grades a curve from its low, mid and high copy counts.
    pub fn grade(low: u32, mid: u32, high: u32) -> Self {
        if low < 15 {
            CurveQuality::Poor
        } else if mid < 20 || high > 8 {
            CurveQuality::Fair
        } else if low >= 18 && mid >= 25 && high <= 6 {
            CurveQuality::Excellent
        } else {
            CurveQuality::Good
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CurveQuality::Poor => "poor",
            CurveQuality::Fair => "fair",
            CurveQuality::Good => "good",
            CurveQuality::Excellent => "excellent",
        }
    }
}

impl fmt::Display for CurveQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of the main deck.
///
/// Cards missing from the catalog are left out of every figure. Copies of
/// cards without a cost are counted in `cost_curve.uncosted` only.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct DeckStatistics {
    pub total_cards: u32,
    pub cost_curve: CostCurve,
    pub aspects: AspectCounts,
    pub types: BTreeMap<CardType, u32>,
    /// Mean cost over costed copies, `None` when there are none.
    pub average_cost: Option<f64>,
    pub low_cost: u32,
    pub mid_cost: u32,
    pub high_cost: u32,
    pub curve_quality: CurveQuality,
}

impl DeckStatistics {
    pub fn compute<L: CardLookup + ?Sized>(deck: &DeckComposition, catalog: &L) -> Self {
        Self::compute_with_rules(deck, catalog, &DeckRules::default())
    }

    pub fn compute_with_rules<L: CardLookup + ?Sized>(
        deck: &DeckComposition,
        catalog: &L,
        rules: &DeckRules,
    ) -> Self {
        let mut low_cost = 0u32;
        let mut mid_cost = 0u32;
        let mut high_cost = 0u32;
        let mut cost_sum: u64 = 0;
        let mut costed = 0u32;

        for (card_id, count) in deck.iter_entries(Ledger::Main) {
            let Some(cost) = catalog.lookup(card_id).and_then(|card| card.cost) else {
                continue;
            };
            cost_sum = cost_sum.saturating_add(u64::from(cost) * u64::from(count));
            costed = costed.saturating_add(count);
            let bucket = if cost <= LOW_COST_MAX {
                &mut low_cost
            } else if cost >= HIGH_COST_MIN {
                &mut high_cost
            } else {
                &mut mid_cost
            };
            *bucket = bucket.saturating_add(count);
        }

        let average_cost = (costed > 0).then(|| cost_sum as f64 / f64::from(costed));

        Self {
            total_cards: deck.total_count(Ledger::Main),
            cost_curve: cost_curve(deck, Ledger::Main, catalog, rules.cost_curve_max),
            aspects: aspect_totals(deck, Ledger::Main, catalog),
            types: type_counts(deck, Ledger::Main, catalog),
            average_cost,
            low_cost,
            mid_cost,
            high_cost,
            curve_quality: CurveQuality::grade(low_cost, mid_cost, high_cost),
        }
    }
}
