use std::path::Path;
use std::sync::Arc;

use apiproxy_core::{DataFormat, Vars};
use apiproxy_exec::{
    BackoffConfig, ExecError, Executor, HttpResponseParts, Registry, RegistryError,
    ReqwestTransport, TransportConfig,
};

use crate::exit_codes;
use crate::output::{print_error, print_response};
use crate::{OutputArgs, VarsArgs};

pub fn build_registry(output: &OutputArgs) -> Result<Registry, i32> {
    build_executor(output, BackoffConfig::default()).map(Registry::new)
}

pub fn build_executor(output: &OutputArgs, backoff: BackoffConfig) -> Result<Executor, i32> {
    match ReqwestTransport::new(TransportConfig::default()) {
        Ok(transport) => Ok(Executor::new(Arc::new(transport)).with_backoff(backoff)),
        Err(e) => {
            print_error(output.format, output.quiet, &format!("failed to create http client: {e}"));
            Err(exit_codes::RUNTIME_ERROR)
        }
    }
}

/// Reads a definitions or templates file, picking the format from its extension
/// and falling back to content detection.
pub fn read_records(path: &Path, output: &OutputArgs) -> Result<(DataFormat, Vec<u8>), i32> {
    let data = match std::fs::read(path) {
        Ok(d) => d,
        Err(e) => {
            print_error(
                output.format,
                output.quiet,
                &format!("failed to read {}: {e}", path.display()),
            );
            return Err(exit_codes::RUNTIME_ERROR);
        }
    };
    let format = DataFormat::from_path(path).unwrap_or(DataFormat::Auto);
    Ok((format, data))
}

/// Collects template variables from `--vars` JSON, then applies `--set` overrides.
pub fn load_vars(args: &VarsArgs, output: &OutputArgs) -> Result<Vars, i32> {
    let mut vars = Vars::new();
    if let Some(json) = &args.json {
        let value: serde_json::Value = match serde_json::from_str(json) {
            Ok(v) => v,
            Err(e) => {
                print_error(output.format, output.quiet, &format!("invalid --vars JSON: {e}"));
                return Err(exit_codes::VALIDATION_FAILED);
            }
        };
        let Some(map) = value.as_object() else {
            print_error(output.format, output.quiet, "--vars must be a JSON object");
            return Err(exit_codes::VALIDATION_FAILED);
        };
        for (k, v) in map {
            let v = match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            vars.insert(k.clone(), v);
        }
    }
    for s in &args.set {
        match s.split_once('=') {
            Some((k, v)) => {
                vars.insert(k.trim().to_string(), v.to_string());
            }
            None => {
                print_error(
                    output.format,
                    output.quiet,
                    &format!("--set expects KEY=VALUE, got {s:?}"),
                );
                return Err(exit_codes::VALIDATION_FAILED);
            }
        }
    }
    Ok(vars)
}

/// Prints the outcome of a run and maps it to an exit code.
pub fn report_run(result: Result<HttpResponseParts, RegistryError>, output: &OutputArgs) -> i32 {
    match result {
        Ok(resp) => {
            print_response(output.format, output.quiet, &resp, None);
            exit_codes::SUCCESS
        }
        Err(e) => {
            let message = e.to_string();
            match e.response() {
                Some(resp) => print_response(output.format, output.quiet, resp, Some(&message)),
                None => print_error(output.format, output.quiet, &message),
            }
            exit_code_for(&e)
        }
    }
}

pub fn exit_code_for(err: &RegistryError) -> i32 {
    match err {
        RegistryError::Validation(_) | RegistryError::Parse(_) | RegistryError::Store(_) => {
            exit_codes::VALIDATION_FAILED
        }
        RegistryError::Exec(ExecError::MissingTarget) => exit_codes::VALIDATION_FAILED,
        RegistryError::Exec(_) => exit_codes::RUN_FAILED,
        RegistryError::Batch { source, .. } => exit_code_for(source),
    }
}
