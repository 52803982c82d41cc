//! Presence detection.
//!
//! "Unset" is defined by how a field is stored, never by comparing its value
//! to a zero value:
//!
//! | Kind | Unset when |
//! |---|---|
//! | optional-reference | nothing is assigned |
//! | associative-collection | no collection is assigned (an empty one is set) |
//! | embedded-value | never |
//! | scalar | undefined |

use crate::foundation::{FieldKind, FieldValue};

/// Presence strategy, resolved once per field when its validator is built.
///
/// Scalars have no strategy, so a validator that needs one cannot be built
/// for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresenceCheck {
    /// Set when a reference is assigned.
    ReferenceAssigned,
    /// Set when a collection is assigned, whatever its length.
    CollectionAssigned,
    /// Stored inline, always set.
    AlwaysSet,
}

impl PresenceCheck {
    /// Strategy for a field kind, or `None` for scalars.
    #[must_use]
    pub const fn for_kind(kind: FieldKind) -> Option<Self> {
        match kind {
            FieldKind::OptionalReference => Some(Self::ReferenceAssigned),
            FieldKind::AssociativeCollection => Some(Self::CollectionAssigned),
            FieldKind::EmbeddedValue => Some(Self::AlwaysSet),
            FieldKind::Scalar => None,
        }
    }

    /// The kind this strategy applies to.
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::ReferenceAssigned => FieldKind::OptionalReference,
            Self::CollectionAssigned => FieldKind::AssociativeCollection,
            Self::AlwaysSet => FieldKind::EmbeddedValue,
        }
    }

    /// Applies the strategy. Returns `None` when the value is not of the
    /// kind this strategy was resolved for.
    #[must_use]
    pub fn is_set(self, value: &FieldValue<'_>) -> Option<bool> {
        match (self, value) {
            (Self::ReferenceAssigned, FieldValue::Reference(target)) => Some(target.is_some()),
            (Self::CollectionAssigned, FieldValue::Collection(len)) => Some(len.is_some()),
            (Self::AlwaysSet, FieldValue::Embedded(_)) => Some(true),
            _ => None,
        }
    }
}

/// Reports whether a value of the given kind is set.
///
/// Returns `None` when presence is undefined: scalar fields, or a value that
/// does not match `kind`.
#[must_use]
pub fn is_set(kind: FieldKind, value: &FieldValue<'_>) -> Option<bool> {
    PresenceCheck::for_kind(kind)?.is_set(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{Shape, Subject, Target};
    use rstest::rstest;

    struct Inline;

    impl Subject for Inline {
        fn shape() -> Shape {
            Shape::of::<Self>()
        }

        fn field(&self, _name: &str) -> Option<FieldValue<'_>> {
            None
        }
    }

    #[rstest]
    #[case(FieldValue::Reference(None), Some(false))]
    #[case(FieldValue::Reference(Some(Target::Opaque)), Some(true))]
    #[case(FieldValue::Scalar, None)]
    fn optional_reference(#[case] value: FieldValue<'static>, #[case] expected: Option<bool>) {
        assert_eq!(is_set(FieldKind::OptionalReference, &value), expected);
    }

    #[rstest]
    #[case(FieldValue::Collection(None), Some(false))]
    #[case(FieldValue::Collection(Some(0)), Some(true))]
    #[case(FieldValue::Collection(Some(3)), Some(true))]
    fn associative_collection(#[case] value: FieldValue<'static>, #[case] expected: Option<bool>) {
        assert_eq!(is_set(FieldKind::AssociativeCollection, &value), expected);
    }

    #[test]
    fn embedded_value_is_always_set() {
        let inline = Inline;
        assert_eq!(
            is_set(FieldKind::EmbeddedValue, &FieldValue::embedded(&inline)),
            Some(true)
        );
    }

    #[test]
    fn scalar_presence_is_undefined() {
        assert_eq!(PresenceCheck::for_kind(FieldKind::Scalar), None);
        assert_eq!(is_set(FieldKind::Scalar, &FieldValue::Scalar), None);
    }

    #[test]
    fn strategies_map_back_to_their_kind() {
        for kind in [
            FieldKind::OptionalReference,
            FieldKind::AssociativeCollection,
            FieldKind::EmbeddedValue,
        ] {
            assert_eq!(PresenceCheck::for_kind(kind).map(PresenceCheck::kind), Some(kind));
        }
    }
}
