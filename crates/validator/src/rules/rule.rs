//! Compiled rules.

use crate::rules::Operator;
use serde::Serialize;
use std::fmt;

/// A parsed, immutable rule.
///
/// One variant per [`Operator`]; parameters and error code are already
/// checked, so evaluation never has to reinterpret the source string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "operator", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rule {
    /// The field must be present; `code` is reported when it is not.
    Required {
        /// Code reported when the field is unset.
        code: String,
    },
    /// `code` is reported once for every companion the input also supplied.
    MutuallyExclusive {
        /// Companion field names, in declaration order.
        companions: Vec<String>,
        /// Code reported per supplied companion.
        code: String,
    },
    /// Halts evaluation of later fields when this field reported any code.
    StopAll,
}

impl Rule {
    /// The rule's operator.
    #[must_use]
    pub const fn operator(&self) -> Operator {
        match self {
            Self::Required { .. } => Operator::Required,
            Self::MutuallyExclusive { .. } => Operator::MutuallyExclusive,
            Self::StopAll => Operator::StopAll,
        }
    }

    /// The code the rule reports, if it reports one.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Required { code } | Self::MutuallyExclusive { code, .. } => Some(code),
            Self::StopAll => None,
        }
    }

    /// Ordered parameters, excluding the error code.
    #[must_use]
    pub fn params(&self) -> &[String] {
        match self {
            Self::MutuallyExclusive { companions, .. } => companions,
            Self::Required { .. } | Self::StopAll => &[],
        }
    }

    /// Returns true if the rule can only run on fields with presence
    /// semantics.
    #[must_use]
    pub const fn requires_presence(&self) -> bool {
        self.operator().requires_presence()
    }
}

/// Renders the rule back in canonical specification form.
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { code } => write!(f, "{}:{code}", Operator::Required),
            Self::MutuallyExclusive { companions, code } => write!(
                f,
                "{}:{}:{code}",
                Operator::MutuallyExclusive,
                companions.join(",")
            ),
            Self::StopAll => write!(f, "{}", Operator::StopAll),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let rule = Rule::MutuallyExclusive {
            companions: vec!["A".into(), "B".into()],
            code: "BAD_MEX".into(),
        };
        assert_eq!(rule.operator(), Operator::MutuallyExclusive);
        assert_eq!(rule.error_code(), Some("BAD_MEX"));
        assert_eq!(rule.params(), ["A", "B"]);
        assert!(!rule.requires_presence());

        assert_eq!(Rule::StopAll.error_code(), None);
        assert!(Rule::StopAll.params().is_empty());
    }

    #[test]
    fn display_is_canonical() {
        let rule = Rule::Required {
            code: "MISSING".into(),
        };
        assert_eq!(rule.to_string(), "REQUIRED:MISSING");

        let rule = Rule::MutuallyExclusive {
            companions: vec!["A".into(), "B".into()],
            code: "BAD_MEX".into(),
        };
        assert_eq!(rule.to_string(), "MUTUALLY_EXCLUSIVE:A,B:BAD_MEX");
    }

    #[test]
    fn serializes_with_operator_tag() {
        let value = serde_json::to_value(Rule::Required {
            code: "MISSING".into(),
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "operator": "REQUIRED", "code": "MISSING" })
        );
    }
}
