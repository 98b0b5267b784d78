mod placeholder;

pub use placeholder::{placeholders, substitute, PLACEHOLDER_PATTERN};
