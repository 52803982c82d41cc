//! # fieldrules
//!
//! Declarative, rule-based validation of structured objects.
//!
//! Rules are short strings attached to named fields (`REQUIRED:MISSING`,
//! `MUTUALLY_EXCLUSIVE:card,iban:BAD_MEX`, `STOPALL`). They are compiled
//! once, against a description of the object's fields, into immutable
//! validators that can then run concurrently on any number of objects.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fieldrules::prelude::*;
//!
//! struct Payment {
//!     card: Option<String>,
//!     iban: Option<String>,
//! }
//!
//! subject! {
//!     Payment {
//!         "Card" => card: reference,
//!         "Iban" => iban: reference,
//!     }
//! }
//!
//! let config = RuleSetConfig::from_json_str(
//!     r#"{"rules": [["Card", "REQ:NO_CARD", "MEX:Iban:BAD_MEX"]]}"#,
//! )?;
//! let rules = RuleSet::from_config::<Payment>(&config)?;
//!
//! let payment = Payment { card: Some("4111".into()), iban: Some("DE89".into()) };
//! let known: KnownSetFields = ["Card", "Iban"].into_iter().collect();
//! let report = rules.check(&payment, &known)?;
//! assert_eq!(report.codes_for("Card").unwrap(), ["BAD_MEX"]);
//! ```
//!
//! ## Layout
//!
//! - [`rules`]: the rule language and its parser
//! - [`presence`]: deciding whether a field is set, from its kind
//! - [`object`]: building and running per-field validators
//! - [`RuleSet`]: all validators for one subject type, with nesting
//! - [`config`]: JSON rule declarations
//!
//! ## Field kinds
//!
//! | Kind | Unset when | `REQUIRED` | `MUTUALLY_EXCLUSIVE` |
//! |---|---|---|---|
//! | optional reference | nothing assigned | yes | yes |
//! | associative collection | no collection assigned | yes | yes |
//! | embedded value | never | yes | yes |
//! | scalar | undefined | rejected at build | yes |

pub mod config;
pub mod foundation;
mod macros;
pub mod object;
pub mod prelude;
pub mod presence;
mod rule_set;
pub mod rules;

pub use config::{BuilderConfig, FieldRules, RuleSetConfig};
pub use foundation::{
    BuildError, BuildResult, ConfigError, FieldErrors, FieldKind, FieldShape, FieldValue,
    InvalidSubjectError, KnownSetFields, MalformedReason, Shape, Subject, Target,
    ValidationContext, ValidationReport, ValidationResult,
};
pub use object::{FieldValidator, ObjectValidatorBuilder};
pub use presence::PresenceCheck;
pub use rule_set::RuleSet;
pub use rules::{Operator, Rule, RuleParser, parse_rules};
