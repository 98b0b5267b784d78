use std::time::Duration;

use apiproxy_core::types::duration::parse_duration;
use apiproxy_core::SelectStrategy;
use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// Request shape for an ad-hoc definition.
#[derive(Debug, Args, Clone)]
pub struct RequestArgs {
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,
    #[arg(short = 'H', long = "header", value_name = "KEY: VALUE")]
    pub headers: Vec<String>,
    #[arg(short = 'd', long = "data")]
    pub body: Option<String>,
    /// Overall deadline, e.g. `5s` or `1500ms`.
    #[arg(short = 't', long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,
    #[arg(long, default_value = "round_robin")]
    pub selector: SelectStrategy,
    #[arg(long = "retry-code", value_name = "STATUS")]
    pub retry_codes: Vec<u16>,
    /// Same-endpoint retries for a single URL; failover never retries in place.
    #[arg(long, default_value_t = apiproxy_exec::retry::DEFAULT_RETRY_MAX)]
    pub retry_max: usize,
}

/// Template variables: a JSON object plus individual overrides.
#[derive(Debug, Args, Clone)]
pub struct VarsArgs {
    #[arg(short = 'v', long = "vars", value_name = "JSON")]
    pub json: Option<String>,
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}
