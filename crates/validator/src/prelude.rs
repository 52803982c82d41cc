//! Prelude module for convenient imports.
//!
//! Provides a single `use fieldrules::prelude::*;` import that brings in the
//! types needed to describe subjects, build rule sets and read reports.
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldrules::prelude::*;
//!
//! let builder = ObjectValidatorBuilder::with_default_error_code("INVALID");
//! let rules = RuleSet::build::<Order>(&builder, &[FieldRules::new("Customer", ["REQ"])])?;
//! ```

// ============================================================================
// FOUNDATION: Subjects, context, outcomes, errors
// ============================================================================

pub use crate::foundation::{
    BuildError, FieldKind, FieldShape, FieldValue, InvalidSubjectError, KnownSetFields, Shape,
    Subject, ValidationContext, ValidationReport, ValidationResult,
};

// ============================================================================
// BUILDING: Rules, builders, configuration
// ============================================================================

pub use crate::config::{BuilderConfig, FieldRules, RuleSetConfig};
pub use crate::object::{FieldValidator, ObjectValidatorBuilder};
pub use crate::rule_set::RuleSet;
pub use crate::rules::{Operator, Rule};

// ============================================================================
// MACROS
// ============================================================================

pub use crate::subject;
