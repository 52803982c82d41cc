//! Field validators: compiled rules bound to one field.

use crate::foundation::{
    BuildError, BuildResult, FieldKind, FieldValue, InvalidSubjectError, KnownSetFields, Subject,
    Target, ValidationContext, ValidationReport, ValidationResult,
};
use crate::presence::PresenceCheck;
use crate::rules::Rule;
use std::ops::ControlFlow;

/// Rules for one field, with the field's representation resolved up front.
///
/// Immutable once built. A single instance can serve any number of
/// concurrent validations, each with its own [`ValidationContext`].
#[derive(Debug, Clone)]
pub struct FieldValidator {
    name: String,
    path: String,
    kind: FieldKind,
    presence: Option<PresenceCheck>,
    rules: Vec<Rule>,
    stop_all: bool,
    route: Vec<RouteStep>,
    nested: Option<NestedFields>,
}

/// One composite field crossed on the way from the context's subject to the
/// validated field.
#[derive(Debug, Clone)]
pub(crate) struct RouteStep {
    pub(crate) name: String,
    pub(crate) kind: FieldKind,
    pub(crate) type_name: &'static str,
}

#[derive(Debug, Clone)]
struct NestedFields {
    type_name: &'static str,
    fields: Vec<FieldValidator>,
}

impl FieldValidator {
    /// Binds `rules` to a field, rejecting rules the kind cannot support.
    pub(crate) fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        kind: FieldKind,
        rules: Vec<Rule>,
    ) -> BuildResult<Self> {
        let path = path.into();
        let presence = PresenceCheck::for_kind(kind);

        if presence.is_none()
            && let Some(rule) = rules.iter().find(|rule| rule.requires_presence())
        {
            return Err(BuildError::UnsupportedFieldType {
                field: path,
                kind,
                operator: rule.operator(),
            });
        }

        let stop_all = rules.iter().any(|rule| matches!(rule, Rule::StopAll));

        Ok(Self {
            name: name.into(),
            path,
            kind,
            presence,
            rules,
            stop_all,
            route: Vec::new(),
            nested: None,
        })
    }

    /// Makes the validator reach its field through `route`, starting from
    /// the context's subject.
    pub(crate) fn with_route(mut self, route: Vec<RouteStep>) -> Self {
        self.route = route;
        self
    }

    pub(crate) fn with_nested(mut self, type_name: &'static str, fields: Vec<Self>) -> Self {
        self.nested = Some(NestedFields { type_name, fields });
        self
    }

    /// Field name as exposed by the subject.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dotted path from the root subject.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Representation kind resolved at build time.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Compiled rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns true if a failure on this field halts evaluation of the
    /// fields after it.
    #[must_use]
    pub fn stops_all(&self) -> bool {
        self.stop_all
    }

    /// Validators for fields of the nested subject, if any were declared.
    #[must_use]
    pub fn nested_fields(&self) -> &[Self] {
        self.nested
            .as_ref()
            .map_or(&[], |nested| nested.fields.as_slice())
    }

    /// Runs this field's rules against the context's subject.
    ///
    /// A validator built for a dotted path walks that path from the
    /// context's subject first; if a reference along the way is unset there
    /// is nothing to validate and the result is empty.
    ///
    /// Rules run in declaration order; a failed `REQUIRED` does not stop
    /// later rules. Nested validators are not run here, see
    /// [`RuleSet`](crate::RuleSet).
    ///
    /// # Errors
    ///
    /// [`InvalidSubjectError`] if the subject lacks the field or stores it
    /// with a different representation than the one this validator was
    /// built for.
    pub fn validate(
        &self,
        ctx: &ValidationContext<'_>,
    ) -> Result<ValidationResult, InvalidSubjectError> {
        Ok(match self.lookup(ctx)? {
            Some(value) => self.evaluate(ctx, &value),
            None => ValidationResult::new(),
        })
    }

    /// Validates this field, then its nested fields, recording every
    /// non-empty result in `report`.
    pub(crate) fn validate_into(
        &self,
        ctx: &ValidationContext<'_>,
        report: &mut ValidationReport,
    ) -> Result<ControlFlow<()>, InvalidSubjectError> {
        let Some(value) = self.lookup(ctx)? else {
            return Ok(ControlFlow::Continue(()));
        };
        let result = self.evaluate(ctx, &value);
        let failed = !result.is_empty();
        report.record(&self.path, result);

        if failed && self.stop_all {
            tracing::trace!(field = %self.path, "stop-all rule halted validation");
            return Ok(ControlFlow::Break(()));
        }

        let Some(nested) = &self.nested else {
            return Ok(ControlFlow::Continue(()));
        };

        // Unset references have nothing to descend into.
        let Some(child) = descend(value, nested.type_name)? else {
            return Ok(ControlFlow::Continue(()));
        };

        let child_ctx = ctx.with_subject(child);
        for field in &nested.fields {
            if field.validate_into(&child_ctx, report)?.is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Finds the field's value, or `None` when an unset reference on the
    /// route leaves nothing to validate.
    fn lookup<'a>(
        &self,
        ctx: &ValidationContext<'a>,
    ) -> Result<Option<FieldValue<'a>>, InvalidSubjectError> {
        let mut subject = ctx.subject();
        let mut end = 0;
        for step in &self.route {
            end += step.name.len();
            let value = expose(subject, &step.name, &self.path[..end], step.kind)?;
            end += 1;
            match descend(value, step.type_name)? {
                Some(child) => subject = child,
                None => return Ok(None),
            }
        }
        expose(subject, &self.name, &self.path, self.kind).map(Some)
    }

    fn evaluate(&self, ctx: &ValidationContext<'_>, value: &FieldValue<'_>) -> ValidationResult {
        // `None` only for scalars, which carry no presence-dependent rules.
        let set = self.presence.and_then(|check| check.is_set(value));
        let unset = set == Some(false);

        let mut result = ValidationResult::new();
        if unset {
            result.mark_unset();
        }

        for rule in &self.rules {
            match rule {
                Rule::Required { code } => {
                    if unset {
                        result.add(code.as_str());
                    }
                }
                // An absent field cannot conflict with its companions.
                Rule::MutuallyExclusive { companions, code } if !unset => {
                    let known = ctx.known_set_fields();
                    for companion in companions {
                        if self.companion_supplied(known, companion) {
                            result.add(code.as_str());
                        }
                    }
                }
                Rule::MutuallyExclusive { .. } | Rule::StopAll => {}
            }
        }

        result
    }

    /// Companions are siblings: `Iban` declared on `Payment.Card` means
    /// `Payment.Iban`, falling back to the name as written.
    fn companion_supplied(&self, known: &KnownSetFields, companion: &str) -> bool {
        if let Some((parent, _)) = self.path.rsplit_once('.')
            && known.contains(&format!("{parent}.{companion}"))
        {
            return true;
        }
        known.contains(companion)
    }
}

/// Reads one field off `subject`, checking it has the kind resolved at
/// build time.
fn expose<'a>(
    subject: &'a dyn Subject,
    name: &str,
    path: &str,
    kind: FieldKind,
) -> Result<FieldValue<'a>, InvalidSubjectError> {
    let value = subject
        .field(name)
        .ok_or_else(|| InvalidSubjectError::MissingField {
            field: path.to_owned(),
            subject: subject.type_name(),
        })?;

    if value.kind() != kind {
        return Err(InvalidSubjectError::KindMismatch {
            field: path.to_owned(),
            expected: kind,
            found: value.kind(),
        });
    }
    Ok(value)
}

/// The nested subject behind a composite value, checked against the type it
/// was built for. `None` when nothing is assigned.
fn descend<'a>(
    value: FieldValue<'a>,
    expected: &'static str,
) -> Result<Option<&'a dyn Subject>, InvalidSubjectError> {
    if let FieldValue::Reference(Some(Target::Opaque)) = value {
        return Err(InvalidSubjectError::WrongSubject {
            expected,
            found: "opaque value",
        });
    }

    let Some(child) = value.nested() else {
        return Ok(None);
    };
    if child.type_name() != expected {
        return Err(InvalidSubjectError::WrongSubject {
            expected,
            found: child.type_name(),
        });
    }
    Ok(Some(child))
}
