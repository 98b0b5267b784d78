#![forbid(unsafe_code)]

pub mod error;
pub mod expressions;
pub mod parser;
pub mod render;
pub mod types;
pub mod validate;

pub use crate::error::{CoreError, ParseError, ValidationError};
pub use crate::parser::{parse_definitions, parse_templates, DataFormat};
pub use crate::render::{merge_vars, new_id};
pub use crate::types::{
    CallConfig, Checker, Definition, FallbackConfig, Method, SelectStrategy, Template, VarSpec,
    Vars, ALLOWED_METHODS, DEFAULT_TIMEOUT, SUCCESS_CODES,
};
pub use crate::validate::Parse;
