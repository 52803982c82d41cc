//! Per-request validation context.
//!
//! A [`ValidationContext`] pairs the decoded subject with the
//! [`KnownSetFields`] recorded from the raw input. It is created once per
//! top-level validation and passed by reference through every nested field,
//! so cross-field rules see the whole request, not just one nested object.

use crate::foundation::Subject;
use std::collections::HashSet;
use std::fmt;

// ============================================================================
// KNOWN SET FIELDS
// ============================================================================

/// Names of the fields the raw input explicitly supplied.
///
/// Only membership matters. Nested fields are recorded as dotted paths
/// (`"address.city"`). Decoded payloads cannot tell "omitted" apart from
/// "sent a zero value"; this set can.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownSetFields {
    names: HashSet<String>,
}

impl KnownSetFields {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every key present in a raw JSON document.
    ///
    /// Top-level keys are recorded as-is, nested keys as dotted paths. Objects
    /// inside arrays contribute their keys under the array's own path.
    ///
    /// Only an object root names fields; any other document, including an
    /// array of objects, yields an empty set.
    #[must_use]
    pub fn from_json(raw: &serde_json::Value) -> Self {
        let mut known = Self::new();
        if raw.is_object() {
            known.collect_json(None, raw);
        }
        known
    }

    fn collect_json(&mut self, prefix: Option<&str>, value: &serde_json::Value) {
        match value {
            serde_json::Value::Object(map) => {
                for (key, child) in map {
                    let path = match prefix {
                        Some(prefix) => format!("{prefix}.{key}"),
                        None => key.clone(),
                    };
                    self.collect_json(Some(&path), child);
                    self.names.insert(path);
                }
            }
            serde_json::Value::Array(items) => {
                for item in items {
                    self.collect_json(prefix, item);
                }
            }
            _ => {}
        }
    }

    /// Records a field name. Returns false if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Returns true if the raw input supplied `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of recorded names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over the recorded names in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for KnownSetFields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for KnownSetFields {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

// ============================================================================
// VALIDATION CONTEXT
// ============================================================================

/// Everything a validator may read during one validation call.
///
/// Contexts are `Copy` and never mutated. Validators return the codes they
/// produce rather than writing them here.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    subject: &'a dyn Subject,
    known_set_fields: &'a KnownSetFields,
}

impl<'a> ValidationContext<'a> {
    /// Creates a context for a top-level validation.
    pub fn new(subject: &'a dyn Subject, known_set_fields: &'a KnownSetFields) -> Self {
        Self {
            subject,
            known_set_fields,
        }
    }

    /// Returns a context for a nested subject that shares this context's
    /// known-set-fields.
    #[must_use]
    pub fn with_subject(&self, subject: &'a dyn Subject) -> Self {
        Self {
            subject,
            known_set_fields: self.known_set_fields,
        }
    }

    /// The object under validation.
    #[must_use]
    pub fn subject(&self) -> &'a dyn Subject {
        self.subject
    }

    /// Fields the raw input explicitly supplied.
    #[must_use]
    pub fn known_set_fields(&self) -> &'a KnownSetFields {
        self.known_set_fields
    }
}

impl fmt::Debug for ValidationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationContext")
            .field("subject", &self.subject.type_name())
            .field("known_set_fields", &self.known_set_fields)
            .finish()
    }
}
