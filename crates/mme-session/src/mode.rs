//! View mode: which editing surface is mounted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two editing surfaces over the same document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Raw JSON text editor.
    #[default]
    Code,
    /// Schema-driven form.
    Form,
}

impl ViewMode {
    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Form => "form",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "code" | "editor" => Ok(Self::Code),
            "form" => Ok(Self::Form),
            other => Err(format!("unknown view mode '{other}' (expected 'code' or 'form')")),
        }
    }
}
