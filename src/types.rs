use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CardType {
    Leader,
    Base,
    Unit,
    Event,
    Upgrade,
}

impl CardType {
    pub const ALL: [CardType; 5] = [
        CardType::Leader,
        CardType::Base,
        CardType::Unit,
        CardType::Event,
        CardType::Upgrade,
    ];

    /// Returns true for the types that may be counted in a deck ledger.
    ///
    /// Leaders and bases occupy dedicated slots and never appear as entries.
    pub const fn is_playable(self) -> bool {
        matches!(self, CardType::Unit | CardType::Event | CardType::Upgrade)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CardType::Leader => "leader",
            CardType::Base => "base",
            CardType::Unit => "unit",
            CardType::Event => "event",
            CardType::Upgrade => "upgrade",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown card type '{0}'")]
pub struct UnknownCardType(pub String);

impl FromStr for CardType {
    type Err = UnknownCardType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardType::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCardType(s.to_string()))
    }
}
