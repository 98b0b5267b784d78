mod config;
mod definition;
pub mod duration;
mod method;
mod template;

pub use config::{CallConfig, Checker, FallbackConfig, SelectStrategy, DEFAULT_TIMEOUT, SUCCESS_CODES};
pub use definition::Definition;
pub use method::{Method, ALLOWED_METHODS};
pub use template::{Template, VarSpec};

/// Template variable values keyed by variable name.
pub type Vars = std::collections::BTreeMap<String, String>;
