//! The rule language.
//!
//! Rules arrive from configuration as compact strings such as
//! `REQUIRED:MISSING` or `MUTUALLY_EXCLUSIVE:card,iban:BAD_MEX` and are
//! compiled into typed [`Rule`] values before any validation runs.
//!
//! ```rust,ignore
//! use fieldrules::rules::{Rule, parse_rules};
//!
//! let rules = parse_rules("payment", &["REQ:MISSING", "MEX:card,iban:BAD_MEX"])?;
//! assert_eq!(rules[0], Rule::Required { code: "MISSING".into() });
//! ```

mod operator;
mod parser;
mod rule;

pub use operator::{Operator, UnknownOperator};
pub use parser::{RuleParser, parse_rules};
pub use rule::Rule;
