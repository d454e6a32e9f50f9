//! Identifier naming conventions for generated column names

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// How a field name is turned into a SQL column identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingConvention {
    /// `CreatedAt` -> `CREATEDAT`
    Upper,

    /// `CreatedAt` -> `createdat`
    Lower,

    /// `CreatedAt` -> `created_at`
    Snake,

    /// Field name used verbatim
    #[default]
    Unchanged,
}

fn snake_boundary() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").expect("static pattern"))
}

impl NamingConvention {
    /// Transform an identifier according to this convention
    pub fn apply(&self, input: &str) -> String {
        match self {
            Self::Upper => input.to_uppercase(),
            Self::Lower => input.to_lowercase(),
            Self::Snake => snake_boundary()
                .replace_all(input, "${1}_${2}")
                .to_lowercase(),
            Self::Unchanged => input.to_string(),
        }
    }

    /// Stable lowercase name, as accepted by `FromStr`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Snake => "snake",
            Self::Unchanged => "unchanged",
        }
    }
}

impl std::fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NamingConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upper" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            "snake" => Ok(Self::Snake),
            "unchanged" | "none" => Ok(Self::Unchanged),
            other => Err(format!("unknown naming convention '{}'", other)),
        }
    }
}
