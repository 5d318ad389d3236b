//! Severity levels
//!
//! Levels are totally ordered: `Info < Recommendation < Warning < Error`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Recommendation,
    Warning,
    Error,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::Info,
        Level::Recommendation,
        Level::Warning,
        Level::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Recommendation => "recommendation",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }

    pub fn is_at_least(&self, other: Level) -> bool {
        *self >= other
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown level '{s}', expected one of info, recommendation, warning, error"))
    }
}
