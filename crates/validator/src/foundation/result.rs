//! Validation outcomes.
//!
//! - [`ValidationResult`] is what one field validator produced.
//! - [`ValidationReport`] is what a whole [`RuleSet`](crate::RuleSet)
//!   produced, with each field's codes paired with its dotted path.

use serde::Serialize;
use std::fmt;

// ============================================================================
// VALIDATION RESULT
// ============================================================================

/// Error codes produced by one field validator, in rule declaration order.
///
/// Duplicates are kept: every rule violation contributes its own code. An
/// empty result means the validator ran and found nothing wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    error_codes: Vec<String>,
    unset: bool,
}

impl ValidationResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an error code.
    pub fn add(&mut self, code: impl Into<String>) {
        self.error_codes.push(code.into());
    }

    /// Records that the field was found unset.
    pub fn mark_unset(&mut self) {
        self.unset = true;
    }

    /// Codes in the order they were produced.
    #[must_use]
    pub fn error_codes(&self) -> &[String] {
        &self.error_codes
    }

    /// Consumes the result, returning its codes.
    #[must_use]
    pub fn into_error_codes(self) -> Vec<String> {
        self.error_codes
    }

    /// Returns true if the field's presence was checked and it was unset.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.unset
    }

    /// Returns true if no code was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.error_codes.is_empty()
    }

    /// Number of codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.error_codes.len()
    }
}

// ============================================================================
// FIELD ERRORS
// ============================================================================

/// Codes produced for one field, tagged with its dotted path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    /// Dotted path of the field, e.g. `"address.city"`.
    pub field: String,
    /// Codes in production order.
    pub codes: Vec<String>,
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.codes.join(", "))
    }
}

// ============================================================================
// VALIDATION REPORT
// ============================================================================

/// Outcome of validating a subject against a [`RuleSet`](crate::RuleSet).
///
/// Only fields that produced at least one code are listed, in the order they
/// were evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    fields: Vec<FieldErrors>,
    stopped: bool,
}

impl ValidationReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field's result. Results without codes are not recorded.
    pub fn record(&mut self, field: &str, result: ValidationResult) {
        if !result.is_empty() {
            self.fields.push(FieldErrors {
                field: field.to_owned(),
                codes: result.into_error_codes(),
            });
        }
    }

    /// Marks that evaluation halted early because of a stop-all rule.
    pub fn mark_stopped(&mut self) {
        self.stopped = true;
    }

    /// Returns true if no field produced a code.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if a stop-all rule cut evaluation short.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Per-field errors in evaluation order.
    #[must_use]
    pub fn fields(&self) -> &[FieldErrors] {
        &self.fields
    }

    /// Codes produced for one field path, if any.
    #[must_use]
    pub fn codes_for(&self, field: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.codes.as_slice())
    }

    /// All codes across all fields, in evaluation order.
    pub fn error_codes(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .flat_map(|entry| entry.codes.iter().map(String::as_str))
    }

    /// Number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field produced a code.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return f.write_str("Validation passed");
        }
        writeln!(f, "Validation failed for {} field(s):", self.fields.len())?;
        for (i, entry) in self.fields.iter().enumerate() {
            writeln!(f, "  {}. {entry}", i + 1)?;
        }
        if self.stopped {
            writeln!(f, "  (stopped early)")?;
        }
        Ok(())
    }
}
