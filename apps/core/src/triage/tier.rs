use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visible health-risk tier of a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTier {
    /// No concern.
    #[default]
    Green,
    /// Monitor.
    Yellow,
    /// Urgent.
    Red,
}

impl HealthTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthTier::Green => "green",
            HealthTier::Yellow => "yellow",
            HealthTier::Red => "red",
        }
    }
}

impl fmt::Display for HealthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown health tier '{0}'")]
pub struct ParseTierError(pub String);

impl FromStr for HealthTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" => Ok(HealthTier::Green),
            "yellow" => Ok(HealthTier::Yellow),
            "red" => Ok(HealthTier::Red),
            other => Err(ParseTierError(other.to_string())),
        }
    }
}
