use std::fmt;

/// One of the three independent card-count collections of a deck.
///
/// Ledgers are not a partition: the same card may be counted in several
/// ledgers at once, and each count is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Ledger {
    Main,
    Side,
    Overflow,
}

impl Ledger {
    /// Reporting order.
    pub const ALL: [Ledger; 3] = [Ledger::Main, Ledger::Side, Ledger::Overflow];

    pub const fn as_str(self) -> &'static str {
        match self {
            Ledger::Main => "main",
            Ledger::Side => "side",
            Ledger::Overflow => "overflow",
        }
    }

    /// Section header used by the plain-text decklist.
    pub const fn section_header(self) -> &'static str {
        match self {
            Ledger::Main => "Main Deck:",
            Ledger::Side => "Sideboard:",
            Ledger::Overflow => "Overflow:",
        }
    }

    pub fn from_section_header(line: &str) -> Option<Ledger> {
        let line = line.trim();
        Ledger::ALL
            .into_iter()
            .find(|ledger| ledger.section_header().eq_ignore_ascii_case(line))
    }
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
