//! Object validation: building and running per-field validators.
//!
//! [`ObjectValidatorBuilder`] turns rule strings into [`FieldValidator`]s,
//! resolving each field's representation up front. The validators are
//! immutable and can be shared across threads.

mod builder;
mod validator;

pub use builder::ObjectValidatorBuilder;
pub use validator::FieldValidator;
