use std::collections::BTreeMap;

use crate::types::CallConfig;

/// A named HTTP call blueprint.
///
/// After [`Parse`](crate::Parse) exactly one target is set: either `url`, or `urls`
/// with at least two entries (fallback mode).
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Definition {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub method: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,

    #[serde(default)]
    pub config: CallConfig,
}

impl Definition {
    pub fn new(name: impl Into<String>, method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: method.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    /// True when the definition resolved to a list of equivalent endpoints.
    pub fn is_fallback(&self) -> bool {
        self.url.is_empty() && !self.urls.is_empty()
    }
}
