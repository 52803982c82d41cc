//! Macros for describing subjects with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`subject!`]: implement [`Subject`](crate::Subject) for a struct from
//!   a list of `"WireName" => field: kind` entries
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldrules::subject;
//! use std::collections::HashMap;
//!
//! struct Child {
//!     cp: Option<String>,
//! }
//!
//! struct Parent {
//!     cp: Option<Box<Child>>,
//!     cm: Option<HashMap<String, String>>,
//!     cv: Child,
//!     s: String,
//! }
//!
//! subject! { Child { "CP" => cp: reference } }
//!
//! subject! {
//!     Parent {
//!         "CP" => cp: reference(Child),
//!         "CM" => cm: collection,
//!         "CV" => cv: embedded(Child),
//!         "S" => s: scalar,
//!     }
//! }
//! ```

// ============================================================================
// SUBJECT MACRO
// ============================================================================

/// Implements [`Subject`](crate::Subject) for an existing struct.
///
/// Each entry maps the name rules refer to onto a struct field and its kind:
///
/// | Kind | Field type | Presence |
/// |---|---|---|
/// | `reference` | `Option<T>` | set when `Some` |
/// | `reference(Nested)` | `Option<Nested>`, `Option<Box<Nested>>`, ... | set when `Some`; rules may descend |
/// | `collection` | `Option<C>` where `C` has `len()` | set when `Some`, even if empty |
/// | `embedded(Nested)` | `Nested` | always set; rules may descend |
/// | `scalar` | anything | undefined |
///
/// Nested types must implement `Subject` themselves.
#[macro_export]
macro_rules! subject {
    // Internal: build-time description of one field.
    (@shape reference) => {
        $crate::FieldShape::new($crate::FieldKind::OptionalReference)
    };
    (@shape reference($nested:ty)) => {
        $crate::FieldShape::nested(
            $crate::FieldKind::OptionalReference,
            <$nested as $crate::Subject>::shape,
        )
    };
    (@shape collection) => {
        $crate::FieldShape::new($crate::FieldKind::AssociativeCollection)
    };
    (@shape embedded($nested:ty)) => {
        $crate::FieldShape::nested(
            $crate::FieldKind::EmbeddedValue,
            <$nested as $crate::Subject>::shape,
        )
    };
    (@shape scalar) => {
        $crate::FieldShape::new($crate::FieldKind::Scalar)
    };

    // Internal: run-time view of one field, given a reference to it.
    (@value reference, $field:expr) => {
        $crate::FieldValue::opaque(($field).as_ref())
    };
    (@value reference($nested:ty), $field:expr) => {
        $crate::FieldValue::reference::<$nested, _>(($field).as_ref())
    };
    (@value collection, $field:expr) => {
        $crate::FieldValue::collection(($field).as_ref().map(|c| c.len()))
    };
    (@value embedded($nested:ty), $field:expr) => {
        $crate::FieldValue::embedded::<$nested>($field)
    };
    (@value scalar, $field:expr) => {{
        let _ = $field;
        $crate::FieldValue::Scalar
    }};

    (
        $ty:ident {
            $( $wire:literal => $field:ident : $kind:ident $( ( $nested:ty ) )? ),* $(,)?
        }
    ) => {
        impl $crate::Subject for $ty {
            fn shape() -> $crate::Shape {
                $crate::Shape::of::<Self>()
                    $( .with_field($wire, $crate::subject!(@shape $kind $( ($nested) )?)) )*
            }

            fn field(&self, name: &str) -> ::core::option::Option<$crate::FieldValue<'_>> {
                match name {
                    $(
                        $wire => ::core::option::Option::Some(
                            $crate::subject!(@value $kind $( ($nested) )?, &self.$field)
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };
}
