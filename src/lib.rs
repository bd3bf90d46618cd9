pub mod aggregate;
pub mod aspect;
pub mod assist;
pub mod card;
pub mod catalog;
pub mod deck;
pub mod export;
pub mod filter;
pub mod ids;
pub mod ledger;
pub mod rules;
pub mod stats;
pub mod types;

#[cfg(test)]
mod tests;

pub use aggregate::{AspectCounts, CostCurve, LedgerTotals, aspect_totals, cost_curve, type_counts};
pub use aspect::{Aspect, AspectSet};
pub use assist::{AssistError, AssistOutcome, NoActionReason, Recommendation};
pub use card::{Card, CardBuilder};
#[cfg(feature = "serialization")]
pub use catalog::CatalogError;
pub use catalog::{CardCatalog, CardLookup};
pub use deck::{DeckComposition, DeckEntry, DeckError};
pub use export::{DecklistError, export_plain_text, parse_plain_text};
pub use filter::CardFilter;
pub use ids::CardId;
pub use ledger::Ledger;
pub use rules::{
    DeckRules, Issue, IssueCode, IssueDetails, Severity, ValidationReport, validate,
    validate_with_rules,
};
pub use stats::{CurveQuality, DeckStatistics};
pub use types::CardType;
