//! Rule operators.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The closed set of rule operators.
///
/// Each operator has a canonical spelling and a short alias:
///
/// | Operator | Canonical | Alias |
/// |---|---|---|
/// | [`Required`](Self::Required) | `REQUIRED` | `REQ` |
/// | [`MutuallyExclusive`](Self::MutuallyExclusive) | `MUTUALLY_EXCLUSIVE` | `MEX` |
/// | [`StopAll`](Self::StopAll) | `STOPALL` | `STOP_ALL` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    /// The field must be present.
    Required,
    /// None of the listed companion fields may be supplied with this one.
    MutuallyExclusive,
    /// Stop evaluating further fields if this field produced any code.
    StopAll,
}

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: [Self; 3] = [Self::Required, Self::MutuallyExclusive, Self::StopAll];

    /// Canonical spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "REQUIRED",
            Self::MutuallyExclusive => "MUTUALLY_EXCLUSIVE",
            Self::StopAll => "STOPALL",
        }
    }

    /// Short spelling accepted by the parser.
    #[must_use]
    pub const fn alias(self) -> &'static str {
        match self {
            Self::Required => "REQ",
            Self::MutuallyExclusive => "MEX",
            Self::StopAll => "STOP_ALL",
        }
    }

    /// Returns true if the operator can only be evaluated on fields with a
    /// defined notion of presence.
    #[must_use]
    pub const fn requires_presence(self) -> bool {
        matches!(self, Self::Required)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operator '{0}'")]
pub struct UnknownOperator(pub String);

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s || op.alias() == s)
            .ok_or_else(|| UnknownOperator(s.to_owned()))
    }
}
