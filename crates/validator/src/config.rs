//! Rule configuration.
//!
//! Rules are declared per field as a JSON array whose first element is the
//! field path and whose remaining elements are rule specifications:
//!
//! ```json
//! {
//!   "default_error_code": "INVALID",
//!   "rules": [
//!     ["Payment", "REQ:MISSING_PAYMENT", "STOPALL"],
//!     ["Payment.Card", "MEX:Iban:BAD_MEX"]
//!   ]
//! }
//! ```

use crate::foundation::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Builder-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Code substituted when a rule omits its own.
    pub default_error_code: Option<String>,
}

impl BuilderConfig {
    /// Config with a default error code.
    #[must_use]
    pub fn with_default_error_code(code: impl Into<String>) -> Self {
        Self {
            default_error_code: Some(code.into()),
        }
    }
}

/// Rule specifications declared for one field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FieldRules {
    field: String,
    specs: Vec<String>,
}

impl FieldRules {
    /// Declares `specs` for the dotted `field` path.
    pub fn new<S: Into<String>>(field: impl Into<String>, specs: impl IntoIterator<Item = S>) -> Self {
        Self {
            field: field.into(),
            specs: specs.into_iter().map(Into::into).collect(),
        }
    }

    /// Dotted field path.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Unparsed rule specifications.
    #[must_use]
    pub fn specs(&self) -> &[String] {
        &self.specs
    }
}

impl TryFrom<Vec<String>> for FieldRules {
    type Error = &'static str;

    fn try_from(mut entry: Vec<String>) -> Result<Self, Self::Error> {
        if entry.is_empty() {
            return Err("rule entry must start with a field path");
        }
        let field = entry.remove(0);
        if field.trim().is_empty() {
            return Err("rule entry has an empty field path");
        }
        Ok(Self {
            field,
            specs: entry,
        })
    }
}

impl From<FieldRules> for Vec<String> {
    fn from(rules: FieldRules) -> Self {
        std::iter::once(rules.field).chain(rules.specs).collect()
    }
}

/// A complete rule set declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetConfig {
    /// Code substituted when a rule omits its own.
    #[serde(default)]
    pub default_error_code: Option<String>,
    /// Field entries in declaration order.
    #[serde(default)]
    pub rules: Vec<FieldRules>,
}

impl RuleSetConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Converts an already parsed JSON document.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Builder settings carried by this configuration.
    #[must_use]
    pub fn builder_config(&self) -> BuilderConfig {
        BuilderConfig {
            default_error_code: self.default_error_code.clone(),
        }
    }
}
