//! Deck construction rules.
//!
//! This module holds the numeric policy ([`DeckRules`]) and the validator that
//! turns a composition into a list of [`Issue`]s.

pub mod issue;
pub mod validation;

pub use issue::{Issue, IssueCode, IssueDetails, Severity};
pub use validation::{ValidationReport, validate, validate_with_rules};

/// Maximum copies of one card allowed in the main deck.
pub const MAX_COPIES: u32 = 3;
/// Minimum main deck size.
pub const MIN_MAIN_CARDS: u32 = 50;
/// Sideboard size above which a warning is raised.
pub const SIDEBOARD_LIMIT: u32 = 10;

/// Numeric construction policy.
///
/// The defaults are the canonical tournament values. Validation uses a floor
/// on the main deck and treats sideboard overage as a warning, since excess
/// sideboard cards belong in the overflow ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DeckRules {
    pub min_main_cards: u32,
    pub max_copies: u32,
    pub sideboard_limit: u32,
    /// An aspect is underrepresented below this fraction of its target share.
    pub balance_threshold: f64,
    /// Costs at or above this value share the top cost-curve bucket.
    pub cost_curve_max: u32,
}

impl Default for DeckRules {
    fn default() -> Self {
        Self {
            min_main_cards: MIN_MAIN_CARDS,
            max_copies: MAX_COPIES,
            sideboard_limit: SIDEBOARD_LIMIT,
            balance_threshold: 0.7,
            cost_curve_max: 8,
        }
    }
}

#[cfg(feature = "serialization")]
impl DeckRules {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
