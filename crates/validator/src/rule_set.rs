//! Rule sets: every field validator declared for one subject type.

use crate::config::{FieldRules, RuleSetConfig};
use crate::foundation::{
    BuildResult, InvalidSubjectError, KnownSetFields, Subject, ValidationContext, ValidationReport,
};
use crate::object::{FieldValidator, ObjectValidatorBuilder};

/// Validators for the fields of one subject type, in declaration order.
///
/// Built all at once: if any declaration is rejected, no rule set exists.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldrules::prelude::*;
///
/// let config = RuleSetConfig::from_json_str(r#"{"rules": [["CP", "REQ:MISSING"]]}"#)?;
/// let rules = RuleSet::from_config::<Parent>(&config)?;
///
/// let known = KnownSetFields::new();
/// let report = rules.check(&parent, &known)?;
/// assert_eq!(report.codes_for("CP"), Some(&["MISSING".to_string()][..]));
/// ```
#[derive(Debug, Clone)]
pub struct RuleSet {
    subject: &'static str,
    fields: Vec<FieldValidator>,
}

impl RuleSet {
    /// Builds validators for every entry against the shape of `T`.
    ///
    /// # Errors
    ///
    /// The first [`BuildError`](crate::BuildError) raised by any entry.
    pub fn build<T: Subject>(
        builder: &ObjectValidatorBuilder,
        entries: &[FieldRules],
    ) -> BuildResult<Self> {
        let fields = builder.build_all::<T>(entries)?;
        let set = Self {
            subject: T::shape().type_name(),
            fields,
        };
        tracing::debug!(subject = set.subject, fields = set.fields.len(), "built rule set");
        Ok(set)
    }

    /// Builds a rule set from a parsed configuration.
    ///
    /// # Errors
    ///
    /// As for [`build`](Self::build).
    pub fn from_config<T: Subject>(config: &RuleSetConfig) -> BuildResult<Self> {
        let builder = ObjectValidatorBuilder::new(config.builder_config());
        Self::build::<T>(&builder, &config.rules)
    }

    /// Type name of the subject this set validates.
    #[must_use]
    pub fn subject_type(&self) -> &'static str {
        self.subject
    }

    /// Top-level field validators.
    #[must_use]
    pub fn fields(&self) -> &[FieldValidator] {
        &self.fields
    }

    /// Finds the validator for a dotted path.
    #[must_use]
    pub fn field(&self, path: &str) -> Option<&FieldValidator> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.fields.iter().find(|f| f.name() == first)?;
        for segment in segments {
            current = current
                .nested_fields()
                .iter()
                .find(|f| f.name() == segment)?;
        }
        Some(current)
    }

    /// Validates every field, descending into nested subjects.
    ///
    /// Fields are evaluated in declaration order, each field before its
    /// nested fields. A field carrying `STOPALL` that reports any code ends
    /// the run and marks the report as stopped.
    ///
    /// # Errors
    ///
    /// [`InvalidSubjectError`] when the subject is not the type the set was
    /// built for or does not expose a declared field as described.
    pub fn validate(
        &self,
        ctx: &ValidationContext<'_>,
    ) -> Result<ValidationReport, InvalidSubjectError> {
        let found = ctx.subject().type_name();
        if found != self.subject {
            return Err(InvalidSubjectError::WrongSubject {
                expected: self.subject,
                found,
            });
        }

        let mut report = ValidationReport::new();
        for field in &self.fields {
            if field.validate_into(ctx, &mut report)?.is_break() {
                report.mark_stopped();
                break;
            }
        }
        Ok(report)
    }

    /// Shorthand for [`validate`](Self::validate) with a fresh context.
    ///
    /// # Errors
    ///
    /// As for [`validate`](Self::validate).
    pub fn check(
        &self,
        subject: &dyn Subject,
        known_set_fields: &KnownSetFields,
    ) -> Result<ValidationReport, InvalidSubjectError> {
        self.validate(&ValidationContext::new(subject, known_set_fields))
    }
}
