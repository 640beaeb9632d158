//! Duplicate tag walk policy

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to do when two posts normalize to the same tag walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// The later post silently replaces the earlier one
    Overwrite,
    /// The later post replaces the earlier one and a warning is logged
    #[default]
    Warn,
    /// Correlation stops with an error
    Error,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            "warn" => Ok(DuplicatePolicy::Warn),
            "error" => Ok(DuplicatePolicy::Error),
            _ => Err(format!(
                "Invalid duplicate policy: '{}'. Valid policies are: overwrite, warn, error",
                s
            )),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DuplicatePolicy::Overwrite => "overwrite",
            DuplicatePolicy::Warn => "warn",
            DuplicatePolicy::Error => "error",
        };
        f.write_str(name)
    }
}
