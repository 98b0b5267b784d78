use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

/// Status codes counted as success when a definition does not list its own.
pub const SUCCESS_CODES: [u16; 10] = [200, 201, 202, 203, 204, 205, 206, 207, 208, 226];

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CallConfig {
    #[serde(default)]
    pub checker: Checker,

    #[serde(default)]
    pub fallback: FallbackConfig,

    /// Zero means "not set"; normalization replaces it with [`DEFAULT_TIMEOUT`].
    #[serde(default, with = "super::duration")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Checker {
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    #[serde(alias = "successCodes")]
    pub success_codes: BTreeSet<u16>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[serde(alias = "headerMatch")]
    pub header_match: BTreeMap<String, String>,
}

impl Checker {
    /// Returns true if `status` counts as success, falling back to [`SUCCESS_CODES`]
    /// when no explicit codes are configured.
    pub fn accepts_status(&self, status: u16) -> bool {
        if self.success_codes.is_empty() {
            SUCCESS_CODES.contains(&status)
        } else {
            self.success_codes.contains(&status)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FallbackConfig {
    #[serde(default)]
    pub selector: SelectStrategy,

    /// Extra statuses that move on to the next endpoint, on top of the built-in set.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    #[serde(alias = "retryCodes")]
    pub retry_codes: BTreeSet<u16>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectStrategy {
    #[default]
    #[serde(alias = "round-robin", alias = "roundrobin")]
    RoundRobin,
    Random,
}

impl SelectStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectStrategy::RoundRobin => "round_robin",
            SelectStrategy::Random => "random",
        }
    }
}

impl std::str::FromStr for SelectStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "round_robin" | "round-robin" | "roundrobin" => Ok(SelectStrategy::RoundRobin),
            "random" => Ok(SelectStrategy::Random),
            other => Err(format!("unknown select strategy: {other}")),
        }
    }
}
