use std::fmt;

use crate::ids::CardId;
use crate::ledger::Ledger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Severity {
    /// The deck is illegal.
    Error,
    /// The deck is legal but suspicious or suboptimal.
    Warning,
}

/// Stable issue codes. Their string form is part of the public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum IssueCode {
    LeaderMissing,
    BaseMissing,
    UnknownCard,
    MainSizeUnderMin,
    CopiesOverLimit,
    SideboardOverLimit,
    AspectIncompatible,
    AspectLowDiversity,
}

impl IssueCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            IssueCode::LeaderMissing => "LEADER_MISSING",
            IssueCode::BaseMissing => "BASE_MISSING",
            IssueCode::UnknownCard => "UNKNOWN_CARD",
            IssueCode::MainSizeUnderMin => "MAIN_SIZE_UNDER_MIN",
            IssueCode::CopiesOverLimit => "COPIES_OVER_LIMIT",
            IssueCode::SideboardOverLimit => "SIDEBOARD_OVER_LIMIT",
            IssueCode::AspectIncompatible => "ASPECT_INCOMPATIBLE",
            IssueCode::AspectLowDiversity => "ASPECT_LOW_DIVERSITY",
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            IssueCode::UnknownCard
            | IssueCode::SideboardOverLimit
            | IssueCode::AspectLowDiversity => Severity::Warning,
            IssueCode::LeaderMissing
            | IssueCode::BaseMissing
            | IssueCode::MainSizeUnderMin
            | IssueCode::CopiesOverLimit
            | IssueCode::AspectIncompatible => Severity::Error,
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured data attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum IssueDetails {
    UnknownCard {
        ledger: Ledger,
        #[cfg_attr(feature = "serialization", serde(rename = "cardId"))]
        card_id: CardId,
    },
    MainSize { have: u32, need: u32 },
    Copies {
        #[cfg_attr(feature = "serialization", serde(rename = "cardId"))]
        card_id: CardId,
        count: u32,
    },
    Sideboard { total: u32, limit: u32 },
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Issue {
    pub severity: Severity,
    pub code: IssueCode,
    pub message: String,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub details: Option<IssueDetails>,
}

impl Issue {
    /// Creates an issue whose severity follows its code.
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: IssueDetails) -> Self {
        self.details = Some(details);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{level}[{}]: {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_code() {
        assert!(Issue::new(IssueCode::LeaderMissing, "x").is_error());
        assert!(Issue::new(IssueCode::UnknownCard, "x").is_warning());
        assert!(Issue::new(IssueCode::AspectLowDiversity, "x").is_warning());
        assert!(Issue::new(IssueCode::AspectIncompatible, "x").is_error());
    }

    #[test]
    fn test_issue_display() {
        let issue = Issue::new(IssueCode::BaseMissing, "Base not selected.");
        assert_eq!(issue.to_string(), "error[BASE_MISSING]: Base not selected.");
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_issue_json() {
        let issue = Issue::new(IssueCode::CopiesOverLimit, "too many").with_details(
            IssueDetails::Copies {
                card_id: CardId::from("x"),
                count: 5,
            },
        );
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "severity": "error",
                "code": "COPIES_OVER_LIMIT",
                "message": "too many",
                "details": {"cardId": "x", "count": 5}
            })
        );
    }
}
