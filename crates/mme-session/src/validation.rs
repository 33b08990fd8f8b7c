//! # Validation Result
//!
//! Outcome of the last explicit validation. Transitions:
//!
//! ```text
//! unknown ──validate()──▶ valid | invalid
//! valid | invalid ──any text mutation──▶ unknown
//! ```

use serde::{Deserialize, Serialize};

/// Tri-state validation outcome.
///
/// Serialized as `{"status":"unknown"}`, `{"status":"valid"}`, or
/// `{"status":"invalid","errors":[...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "errors", rename_all = "lowercase")]
pub enum ValidationResult {
    /// Not validated since the text last changed.
    #[default]
    Unknown,
    /// The text parses and conforms to the schema.
    Valid,
    /// A single parse error, or one message per schema violation.
    Invalid(Vec<String>),
}

impl ValidationResult {
    /// Whether this is [`ValidationResult::Unknown`].
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Whether this is [`ValidationResult::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Error messages; empty unless invalid.
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Invalid(messages) => messages,
            Self::Unknown | Self::Valid => &[],
        }
    }
}
