use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `{{ name }}` with optional inner whitespace; names are case-sensitive.
pub const PLACEHOLDER_PATTERN: &str = r"\{\{\s*([A-Za-z0-9_-]+)\s*\}\}";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

/// Variable names referenced by `input`, in order of appearance (duplicates kept).
pub fn placeholders(input: &str) -> Vec<&str> {
    PLACEHOLDER_RE
        .captures_iter(input)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Replaces every placeholder in `input` with its value from `vars`.
///
/// Names without a value are added to `missing` and their placeholder text is
/// left untouched, so one pass over several fields can report every gap at once.
pub fn substitute(
    input: &str,
    vars: &BTreeMap<String, String>,
    missing: &mut BTreeSet<String>,
) -> String {
    PLACEHOLDER_RE
        .replace_all(input, |caps: &Captures<'_>| match vars.get(&caps[1]) {
            Some(value) => value.clone(),
            None => {
                missing.insert(caps[1].to_string());
                caps[0].to_string()
            }
        })
        .into_owned()
}
