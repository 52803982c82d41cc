//! Subject description: how validated objects expose their fields.
//!
//! Validation never inspects an object's layout at run time. Instead every
//! subject type publishes a [`Shape`] once, at build time, naming each field
//! and its [`FieldKind`]. At validation time the subject only hands out
//! [`FieldValue`]s, which carry exactly enough information to answer
//! "was this field assigned?" and to descend into nested objects.
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldrules::foundation::{FieldKind, FieldShape, FieldValue, Shape, Subject};
//!
//! struct Child;
//!
//! impl Subject for Child {
//!     fn shape() -> Shape {
//!         Shape::of::<Self>()
//!     }
//!
//!     fn field(&self, _name: &str) -> Option<FieldValue<'_>> {
//!         None
//!     }
//! }
//!
//! struct Parent {
//!     child: Option<Child>,
//!     name: String,
//! }
//!
//! impl Subject for Parent {
//!     fn shape() -> Shape {
//!         Shape::of::<Self>()
//!             .with_field("Child", FieldShape::nested(FieldKind::OptionalReference, Child::shape))
//!             .with_field("Name", FieldShape::new(FieldKind::Scalar))
//!     }
//!
//!     fn field(&self, name: &str) -> Option<FieldValue<'_>> {
//!         match name {
//!             "Child" => Some(FieldValue::reference::<Child, _>(self.child.as_ref())),
//!             "Name" => Some(FieldValue::Scalar),
//!             _ => None,
//!         }
//!     }
//! }
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

// ============================================================================
// FIELD KIND
// ============================================================================

/// How a field is represented inside its parent object.
///
/// The kind decides what "unset" means for the field and is resolved once,
/// when a validator is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// A value that may be structurally absent (`Option<T>`, `Option<Box<T>>`).
    OptionalReference,
    /// A keyed container that may itself be absent (`Option<HashMap<K, V>>`).
    AssociativeCollection,
    /// A nested composite stored inline; it can never be absent.
    EmbeddedValue,
    /// An atomic value with no object-level notion of presence.
    Scalar,
}

impl FieldKind {
    /// Returns the kebab-case label used in errors and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OptionalReference => "optional-reference",
            Self::AssociativeCollection => "associative-collection",
            Self::EmbeddedValue => "embedded-value",
            Self::Scalar => "scalar",
        }
    }

    /// Returns true if fields of this kind may hold a nested subject.
    #[must_use]
    pub const fn can_nest(self) -> bool {
        matches!(self, Self::OptionalReference | Self::EmbeddedValue)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SHAPE
// ============================================================================

/// Build-time description of one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldShape {
    /// Representation kind of the field.
    pub kind: FieldKind,
    /// Shape of the nested subject, for composite fields.
    ///
    /// Held as a function so recursive types can describe themselves.
    pub nested: Option<fn() -> Shape>,
}

impl FieldShape {
    /// Describes a field with no nested subject.
    #[must_use]
    pub const fn new(kind: FieldKind) -> Self {
        Self { kind, nested: None }
    }

    /// Describes a field holding a nested subject.
    #[must_use]
    pub const fn nested(kind: FieldKind, shape: fn() -> Shape) -> Self {
        Self {
            kind,
            nested: Some(shape),
        }
    }
}

/// Build-time description of a subject type: its name and its fields in
/// declaration order.
#[derive(Debug, Clone)]
pub struct Shape {
    type_name: &'static str,
    fields: IndexMap<&'static str, FieldShape>,
}

impl Shape {
    /// Creates an empty shape for a type with the given name.
    #[must_use]
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: IndexMap::new(),
        }
    }

    /// Creates an empty shape named after `T`.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    /// Adds a field. A later declaration with the same name replaces the
    /// earlier one but keeps its position.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, name: &'static str, field: FieldShape) -> Self {
        self.fields.insert(name, field);
        self
    }

    /// Name of the described type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldShape> {
        self.fields.get(name)
    }

    /// Iterates over fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldShape)> {
        self.fields.iter().map(|(name, shape)| (*name, shape))
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the shape declares no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ============================================================================
// SUBJECT
// ============================================================================

/// An object that can be validated by rule.
///
/// Implementations are usually generated with [`subject!`](crate::subject).
pub trait Subject {
    /// Describes the type's fields. Called only while building validators.
    fn shape() -> Shape
    where
        Self: Sized;

    /// Returns the current value of a declared field, or `None` if the type
    /// has no field with that name.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Name of the concrete type, matched against [`Shape::type_name`].
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

// ============================================================================
// FIELD VALUE
// ============================================================================

/// What an assigned reference points at.
#[derive(Clone, Copy)]
pub enum Target<'a> {
    /// A nested subject that rules can descend into.
    Object(&'a dyn Subject),
    /// Any other value; only its presence is observable.
    Opaque,
}

impl fmt::Debug for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(subject) => f.debug_tuple("Object").field(&subject.type_name()).finish(),
            Self::Opaque => f.write_str("Opaque"),
        }
    }
}

/// Run-time view of a single field, as seen by the validators.
#[derive(Clone, Copy)]
pub enum FieldValue<'a> {
    /// Optional reference; `None` when nothing is assigned.
    Reference(Option<Target<'a>>),
    /// Keyed collection; `Some(len)` when a collection is assigned, even an
    /// empty one.
    Collection(Option<usize>),
    /// Inline composite.
    Embedded(&'a dyn Subject),
    /// Atomic value.
    Scalar,
}

impl<'a> FieldValue<'a> {
    /// Wraps an optional nested subject.
    ///
    /// Accepts anything that borrows as the subject type, so `Option<T>`,
    /// `Option<Box<T>>` and `Option<Arc<T>>` all work through `as_ref()`.
    pub fn reference<T, R>(value: Option<&'a R>) -> Self
    where
        T: Subject + 'a,
        R: Borrow<T> + ?Sized + 'a,
    {
        Self::Reference(value.map(|v| Target::Object(<R as Borrow<T>>::borrow(v) as &dyn Subject)))
    }

    /// Wraps an optional value that is not itself a subject.
    pub fn opaque<T: ?Sized>(value: Option<&T>) -> Self {
        Self::Reference(value.map(|_| Target::Opaque))
    }

    /// Wraps an optional collection, given its length when assigned.
    #[must_use]
    pub fn collection(len: Option<usize>) -> Self {
        Self::Collection(len)
    }

    /// Wraps an inline nested subject.
    pub fn embedded<T: Subject + 'a>(value: &'a T) -> Self {
        Self::Embedded(value)
    }

    /// The kind this value belongs to.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Reference(_) => FieldKind::OptionalReference,
            Self::Collection(_) => FieldKind::AssociativeCollection,
            Self::Embedded(_) => FieldKind::EmbeddedValue,
            Self::Scalar => FieldKind::Scalar,
        }
    }

    /// The nested subject, if the value holds one.
    #[must_use]
    pub fn nested(&self) -> Option<&'a dyn Subject> {
        match *self {
            Self::Reference(Some(Target::Object(subject))) | Self::Embedded(subject) => {
                Some(subject)
            }
            _ => None,
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference(target) => f.debug_tuple("Reference").field(target).finish(),
            Self::Collection(len) => f.debug_tuple("Collection").field(len).finish(),
            Self::Embedded(subject) => f
                .debug_tuple("Embedded")
                .field(&subject.type_name())
                .finish(),
            Self::Scalar => f.write_str("Scalar"),
        }
    }
}
