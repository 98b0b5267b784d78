use std::collections::BTreeMap;

use crate::types::Definition;

/// A named, parameterized [`Definition`].
///
/// The boolean flags select which fields of `api` are rendered; every other
/// field is copied verbatim, placeholders included.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Template {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub api: Definition,

    #[serde(default)]
    pub method: bool,

    /// Covers both `api.url` and every entry of `api.urls`.
    #[serde(default)]
    pub url: bool,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, bool>,

    #[serde(default)]
    pub body: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vars: Vec<VarSpec>,

    /// Shorthand for `vars` entries that only carry a default value.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub defaults: BTreeMap<String, String>,
}

impl Template {
    pub fn header_is_templated(&self, key: &str) -> bool {
        self.headers.get(key).copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VarSpec {
    pub name: String,

    /// Allowed values; empty means any value.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default, alias = "canEmpty")]
    pub can_empty: bool,
}

impl VarSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn can_be_empty(mut self) -> Self {
        self.can_empty = true;
        self
    }

    pub fn allows(&self, value: &str) -> bool {
        self.options.is_empty() || self.options.iter().any(|o| o == value)
    }
}
