//! Error types.
//!
//! Two phases, two families:
//!
//! - [`BuildError`] is returned while rules are parsed and validators are
//!   assembled. It is fatal to the component that asked for the broken rule.
//! - [`InvalidSubjectError`] is returned when a built validator is handed an
//!   object it was not built for. It means validation could not run at all.
//!
//! Neither is used to report that a subject broke a rule: that outcome is an
//! ordinary, non-empty [`ValidationResult`](crate::foundation::ValidationResult).

use crate::foundation::FieldKind;
use crate::rules::{Operator, UnknownOperator};
use std::path::PathBuf;

// ============================================================================
// BUILD ERRORS
// ============================================================================

/// Why a rule specification string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum MalformedReason {
    /// The specification was empty or whitespace.
    #[error("rule is empty")]
    Empty,
    /// The leading segment is not a known operator.
    #[error("{0}")]
    UnknownOperator(#[from] UnknownOperator),
    /// The operator was given the wrong number of segments.
    #[error("{operator} expects {expected}, found {found} parameter segment(s)")]
    WrongArity {
        /// Operator being parsed.
        operator: Operator,
        /// Human-readable description of the accepted forms.
        expected: &'static str,
        /// Number of segments after the operator.
        found: usize,
    },
    /// The operator needs an error code, none was given and no default is
    /// configured.
    #[error("{0} needs an error code and no default is configured")]
    MissingErrorCode(Operator),
    /// A segment or list item was empty.
    #[error("empty parameter")]
    EmptyParameter,
}

/// Failure while parsing rules or assembling validators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// A rule specification string could not be parsed.
    #[error("malformed rule `{rule}` for field '{field}': {reason}")]
    MalformedRule {
        /// Field the rule was declared on.
        field: String,
        /// The offending specification string.
        rule: String,
        /// What was wrong with it.
        #[source]
        reason: MalformedReason,
    },

    /// A rule needs presence semantics the field's representation lacks.
    #[error("field '{field}' is {kind}, which cannot be checked by {operator}")]
    UnsupportedFieldType {
        /// Field the rule was declared on.
        field: String,
        /// Resolved representation kind.
        kind: FieldKind,
        /// Operator that needed presence semantics.
        operator: Operator,
    },

    /// Rules were declared for a field the subject type does not have.
    #[error("'{subject}' has no field '{field}'")]
    UnknownField {
        /// Dotted path of the missing field.
        field: String,
        /// Type the field was looked up on.
        subject: &'static str,
    },

    /// Nested rules were declared below a field that holds no nested subject.
    #[error("field '{field}' is {kind} and has no nested fields")]
    NotComposite {
        /// Dotted path of the non-composite field.
        field: String,
        /// Its representation kind.
        kind: FieldKind,
    },
}

impl BuildError {
    /// Field path the error is about.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::MalformedRule { field, .. }
            | Self::UnsupportedFieldType { field, .. }
            | Self::UnknownField { field, .. }
            | Self::NotComposite { field, .. } => field,
        }
    }

    pub(crate) fn malformed(field: &str, rule: &str, reason: MalformedReason) -> Self {
        Self::MalformedRule {
            field: field.to_owned(),
            rule: rule.to_owned(),
            reason,
        }
    }
}

// ============================================================================
// RUN-TIME ERRORS
// ============================================================================

/// The object passed to a validator does not match what it was built for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum InvalidSubjectError {
    /// The subject is a different type from the one the validator expects.
    #[error("validator built for '{expected}' was given '{found}'")]
    WrongSubject {
        /// Type name recorded at build time.
        expected: &'static str,
        /// Type name of the subject presented.
        found: &'static str,
    },

    /// The subject does not expose a field the validator needs.
    #[error("'{subject}' does not expose field '{field}'")]
    MissingField {
        /// Dotted path of the field.
        field: String,
        /// Type name of the subject presented.
        subject: &'static str,
    },

    /// The field's value has a different representation from the one
    /// resolved at build time.
    #[error("field '{field}' was built as {expected} but holds {found}")]
    KindMismatch {
        /// Dotted path of the field.
        field: String,
        /// Kind resolved at build time.
        expected: FieldKind,
        /// Kind of the value presented.
        found: FieldKind,
    },
}

// ============================================================================
// CONFIGURATION ERRORS
// ============================================================================

/// Failure while loading a rule configuration document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the expected layout.
    #[error("invalid rule configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The document could not be read.
    #[error("cannot read rule configuration '{}': {source}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
