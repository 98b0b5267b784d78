use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to unmarshal json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to unmarshal yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported data type: {0}")]
    UnsupportedFormat(String),
}

/// Rejections produced while normalizing a definition, validating a template,
/// or resolving template variables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("method {0:?} is invalid")]
    InvalidMethod(String),
    #[error("url or urls is required")]
    MissingTarget,
    #[error("name is required")]
    MissingName,
    #[error("variable name is required")]
    MissingVariableName,
    #[error("default value {default:?} of variable {var} is not one of its options")]
    InvalidDefaultOption { var: String, default: String },
    #[error("variable {0} is required")]
    MissingRequiredVariable(String),
    #[error("value {value:?} of variable {var} is not one of its options")]
    InvalidOption { var: String, value: String },
    #[error("missing values for variables: {}", .0.join(", "))]
    MissingVariableValues(Vec<String>),
    #[error("header {0} is required")]
    MissingHeader(String),
    #[error("body is required")]
    MissingBody,
}
