//! Rule specification parser.
//!
//! Grammar, one rule per string:
//!
//! ```text
//! rule       := operator ( ":" segment )*
//! REQUIRED            [":" code]
//! MUTUALLY_EXCLUSIVE  ":" name ("," name)* [":" code]
//! STOPALL
//! ```
//!
//! Segments are trimmed and must not be empty. A missing code falls back to
//! the parser's default code; without one the rule is rejected.

use crate::foundation::{BuildError, BuildResult, MalformedReason};
use crate::rules::{Operator, Rule, UnknownOperator};

/// Parses rule specification strings into [`Rule`]s.
///
/// Parsing is pure: the same input always yields equal output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleParser {
    default_error_code: Option<String>,
}

impl RuleParser {
    /// Creates a parser that requires every rule to carry its own code.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser that substitutes `code` when a rule omits its code.
    #[must_use]
    pub fn with_default_error_code(code: impl Into<String>) -> Self {
        Self {
            default_error_code: Some(code.into()),
        }
    }

    /// Code used for rules that omit one.
    #[must_use]
    pub fn default_error_code(&self) -> Option<&str> {
        self.default_error_code.as_deref()
    }

    /// Parses every specification declared for `field`, keeping their order.
    ///
    /// Fails on the first malformed specification.
    pub fn parse<S: AsRef<str>>(&self, field: &str, specs: &[S]) -> BuildResult<Vec<Rule>> {
        specs
            .iter()
            .map(|spec| self.parse_one(field, spec.as_ref()))
            .collect()
    }

    /// Parses a single specification declared for `field`.
    pub fn parse_one(&self, field: &str, spec: &str) -> BuildResult<Rule> {
        let malformed = |reason| BuildError::malformed(field, spec, reason);

        if spec.trim().is_empty() {
            return Err(malformed(MalformedReason::Empty));
        }

        let mut segments = spec.split(':').map(str::trim);
        let head = segments.next().unwrap_or_default();
        let operator: Operator = head
            .parse()
            .map_err(|err: UnknownOperator| malformed(MalformedReason::from(err)))?;

        let params: Vec<&str> = segments.collect();
        if params.iter().any(|p| p.is_empty()) {
            return Err(malformed(MalformedReason::EmptyParameter));
        }

        let wrong_arity = |expected| {
            malformed(MalformedReason::WrongArity {
                operator,
                expected,
                found: params.len(),
            })
        };

        match operator {
            Operator::Required => match params.as_slice() {
                [] => Ok(Rule::Required {
                    code: self.fallback_code(operator).map_err(malformed)?,
                }),
                [code] => Ok(Rule::Required {
                    code: (*code).to_owned(),
                }),
                _ => Err(wrong_arity("at most an error code")),
            },
            Operator::MutuallyExclusive => {
                let (names, code) = match params.as_slice() {
                    [names] => (*names, self.fallback_code(operator).map_err(malformed)?),
                    [names, code] => (*names, (*code).to_owned()),
                    _ => return Err(wrong_arity("a field list and an optional error code")),
                };
                let companions: Vec<String> =
                    names.split(',').map(str::trim).map(str::to_owned).collect();
                if companions.iter().any(String::is_empty) {
                    return Err(malformed(MalformedReason::EmptyParameter));
                }
                Ok(Rule::MutuallyExclusive { companions, code })
            }
            Operator::StopAll => {
                if params.is_empty() {
                    Ok(Rule::StopAll)
                } else {
                    Err(wrong_arity("no parameters"))
                }
            }
        }
    }

    fn fallback_code(&self, operator: Operator) -> Result<String, MalformedReason> {
        self.default_error_code
            .clone()
            .ok_or(MalformedReason::MissingErrorCode(operator))
    }
}

/// Parses `specs` for `field` with no default error code.
pub fn parse_rules<S: AsRef<str>>(field: &str, specs: &[S]) -> BuildResult<Vec<Rule>> {
    RuleParser::new().parse(field, specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn reason(result: BuildResult<Rule>) -> MalformedReason {
        match result {
            Err(BuildError::MalformedRule { reason, .. }) => reason,
            other => panic!("expected a malformed rule, got {other:?}"),
        }
    }

    #[test]
    fn parses_required_with_code() {
        let rules = parse_rules("CP", &["REQ:MISSING"]).unwrap();
        assert_eq!(
            rules,
            [Rule::Required {
                code: "MISSING".into()
            }]
        );
    }

    #[test]
    fn parses_mutually_exclusive() {
        let rules = parse_rules("CP", &["MUTUALLY_EXCLUSIVE: setField1 , setField2 :BAD_MEX"])
            .unwrap();
        assert_eq!(
            rules,
            [Rule::MutuallyExclusive {
                companions: vec!["setField1".into(), "setField2".into()],
                code: "BAD_MEX".into(),
            }]
        );
    }

    #[test]
    fn keeps_declaration_order() {
        let rules = parse_rules("CP", &["MEX:a:X", "STOPALL", "REQ:Y"]).unwrap();
        let operators: Vec<_> = rules.iter().map(Rule::operator).collect();
        assert_eq!(
            operators,
            [
                Operator::MutuallyExclusive,
                Operator::StopAll,
                Operator::Required
            ]
        );
    }

    #[test]
    fn default_code_fills_missing_codes() {
        let parser = RuleParser::with_default_error_code("DEF");
        let rules = parser.parse("CP", &["REQ", "MEX:a,b"]).unwrap();
        assert_eq!(rules[0].error_code(), Some("DEF"));
        assert_eq!(rules[1].error_code(), Some("DEF"));
        assert_eq!(rules[1].params(), ["a", "b"]);
    }

    #[test]
    fn missing_code_without_default_is_rejected() {
        assert_eq!(
            reason(RuleParser::new().parse_one("CP", "REQUIRED")),
            MalformedReason::MissingErrorCode(Operator::Required)
        );
        assert_eq!(
            reason(RuleParser::new().parse_one("CP", "MEX:a,b")),
            MalformedReason::MissingErrorCode(Operator::MutuallyExclusive)
        );
    }

    #[rstest]
    #[case("", MalformedReason::Empty)]
    #[case("   ", MalformedReason::Empty)]
    #[case("LEN:5:TOO_LONG", MalformedReason::UnknownOperator(UnknownOperator("LEN".into())))]
    #[case("REQ:", MalformedReason::EmptyParameter)]
    #[case("MEX::CODE", MalformedReason::EmptyParameter)]
    #[case("MEX:a,,b:CODE", MalformedReason::EmptyParameter)]
    #[case("REQ:A:B", MalformedReason::WrongArity {
        operator: Operator::Required,
        expected: "at most an error code",
        found: 2,
    })]
    #[case("MEX", MalformedReason::WrongArity {
        operator: Operator::MutuallyExclusive,
        expected: "a field list and an optional error code",
        found: 0,
    })]
    #[case("MEX:a:B:C", MalformedReason::WrongArity {
        operator: Operator::MutuallyExclusive,
        expected: "a field list and an optional error code",
        found: 3,
    })]
    #[case("STOPALL:X", MalformedReason::WrongArity {
        operator: Operator::StopAll,
        expected: "no parameters",
        found: 1,
    })]
    fn rejects_malformed(#[case] spec: &str, #[case] expected: MalformedReason) {
        let parser = RuleParser::with_default_error_code("DEF");
        assert_eq!(reason(parser.parse_one("F", spec)), expected);
    }

    #[test]
    fn first_malformed_spec_fails_the_field() {
        let err = parse_rules("CP", &["REQ:A", "BOGUS", "REQ:"]).unwrap_err();
        assert_eq!(
            err,
            BuildError::MalformedRule {
                field: "CP".into(),
                rule: "BOGUS".into(),
                reason: MalformedReason::UnknownOperator(UnknownOperator("BOGUS".into())),
            }
        );
    }

    #[test]
    fn parsing_is_repeatable() {
        let specs = ["REQ:MISSING", "MEX:a,b:BAD", "STOPALL"];
        assert_eq!(
            parse_rules("CP", &specs).unwrap(),
            parse_rules("CP", &specs).unwrap()
        );
    }
}
