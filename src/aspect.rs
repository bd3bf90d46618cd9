use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Aspect {
    Aggression,
    Cunning,
    Command,
    Vigilance,
    Heroism,
    Villainy,
}

impl Aspect {
    /// Canonical ordering; every per-aspect report iterates in this order.
    pub const ALL: [Aspect; 6] = [
        Aspect::Aggression,
        Aspect::Cunning,
        Aspect::Command,
        Aspect::Vigilance,
        Aspect::Heroism,
        Aspect::Villainy,
    ];

    pub const fn index(self) -> usize {
        match self {
            Aspect::Aggression => 0,
            Aspect::Cunning => 1,
            Aspect::Command => 2,
            Aspect::Vigilance => 3,
            Aspect::Heroism => 4,
            Aspect::Villainy => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Aspect::Aggression => "aggression",
            Aspect::Cunning => "cunning",
            Aspect::Command => "command",
            Aspect::Vigilance => "vigilance",
            Aspect::Heroism => "heroism",
            Aspect::Villainy => "villainy",
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an aspect name that is not one of the six.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown aspect '{0}'")]
pub struct UnknownAspect(pub String);

impl FromStr for Aspect {
    type Err = UnknownAspect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Aspect::ALL
            .into_iter()
            .find(|aspect| aspect.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownAspect(s.to_string()))
    }
}

/// A set of aspects represented as bitflags for efficient operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AspectSet(u8);

impl AspectSet {
    pub const EMPTY: Self = Self(0);

    /// Creates a new empty AspectSet.
    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn from_aspect(aspect: Aspect) -> Self {
        Self(1 << aspect.index())
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, aspect: Aspect) -> bool {
        self.0 & Self::from_aspect(aspect).0 != 0
    }

    /// Returns true if the two sets have at least one aspect in common.
    pub const fn intersects(self, other: AspectSet) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn union(self, other: AspectSet) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersection(self, other: AspectSet) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns the number of aspects in this set.
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn with(self, aspect: Aspect) -> Self {
        self.union(Self::from_aspect(aspect))
    }

    pub const fn without(self, aspect: Aspect) -> Self {
        Self(self.0 & !Self::from_aspect(aspect).0)
    }

    /// Iterates the members in canonical aspect order.
    pub fn iter(self) -> impl Iterator<Item = Aspect> {
        Aspect::ALL
            .into_iter()
            .filter(move |aspect| self.contains(*aspect))
    }
}

impl From<Aspect> for AspectSet {
    fn from(aspect: Aspect) -> Self {
        Self::from_aspect(aspect)
    }
}

impl FromIterator<Aspect> for AspectSet {
    fn from_iter<T: IntoIterator<Item = Aspect>>(iter: T) -> Self {
        iter.into_iter()
            .fold(AspectSet::EMPTY, |set, aspect| set.with(aspect))
    }
}

impl<'a> FromIterator<&'a Aspect> for AspectSet {
    fn from_iter<T: IntoIterator<Item = &'a Aspect>>(iter: T) -> Self {
        iter.into_iter().copied().collect()
    }
}
