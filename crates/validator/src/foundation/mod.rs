//! Core types shared by every part of the engine.
//!
//! - **Subjects**: [`Subject`], [`Shape`], [`FieldKind`], [`FieldValue`]
//! - **Context**: [`ValidationContext`], [`KnownSetFields`]
//! - **Outcomes**: [`ValidationResult`], [`ValidationReport`], [`FieldErrors`]
//! - **Errors**: [`BuildError`], [`InvalidSubjectError`], [`ConfigError`]
//!
//! # Phases
//!
//! Validators are built once, from rule strings and a subject's [`Shape`],
//! and then run any number of times, concurrently, each run with its own
//! [`ValidationContext`]. Build failures surface as [`BuildError`]; a run
//! either yields a result (possibly empty) or an [`InvalidSubjectError`]
//! when it could not run at all.

pub mod context;
pub mod error;
pub mod result;
pub mod subject;

pub use context::{KnownSetFields, ValidationContext};
pub use error::{BuildError, ConfigError, InvalidSubjectError, MalformedReason};
pub use result::{FieldErrors, ValidationReport, ValidationResult};
pub use subject::{FieldKind, FieldShape, FieldValue, Shape, Subject, Target};

/// Result of a build-phase operation.
pub type BuildResult<T> = Result<T, BuildError>;
