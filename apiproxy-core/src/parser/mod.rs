use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::error::ParseError;
use crate::types::{Definition, Template};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
    Auto,
}

impl DataFormat {
    /// Picks the format from a file extension (`.yaml`, `.yml`, `.json`).
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        match ext.parse::<DataFormat>()? {
            DataFormat::Auto => Err(ParseError::UnsupportedFormat(ext.to_string())),
            format => Ok(format),
        }
    }
}

impl FromStr for DataFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(DataFormat::Yaml),
            "json" => Ok(DataFormat::Json),
            "auto" => Ok(DataFormat::Auto),
            other => Err(ParseError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Deserializes an ordered list of definitions. Records are not validated here.
pub fn parse_definitions(input: &[u8], format: DataFormat) -> Result<Vec<Definition>, ParseError> {
    parse_records(input, format)
}

/// Deserializes an ordered list of templates. Records are not validated here.
pub fn parse_templates(input: &[u8], format: DataFormat) -> Result<Vec<Template>, ParseError> {
    parse_records(input, format)
}

fn parse_records<T: DeserializeOwned>(input: &[u8], format: DataFormat) -> Result<Vec<T>, ParseError> {
    match format {
        DataFormat::Json => Ok(serde_json::from_slice(input)?),
        DataFormat::Yaml => Ok(serde_yaml::from_slice(input)?),
        DataFormat::Auto => parse_records_auto(input),
    }
}

fn parse_records_auto<T: DeserializeOwned>(input: &[u8]) -> Result<Vec<T>, ParseError> {
    // JSON always starts with `{` or `[` after trimming.
    let looks_like_json = input
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'[' || *b == b'{');

    if looks_like_json {
        return match serde_json::from_slice(input) {
            Ok(records) => Ok(records),
            Err(e) => serde_yaml::from_slice(input).map_err(|_| ParseError::Json(e)),
        };
    }

    match serde_yaml::from_slice(input) {
        Ok(records) => Ok(records),
        Err(e) => serde_json::from_slice(input).map_err(|_| ParseError::Yaml(e)),
    }
}
