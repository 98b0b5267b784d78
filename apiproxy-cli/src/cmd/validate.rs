use std::path::Path;

use std::collections::HashSet;

use apiproxy_core::{parse_definitions, parse_templates, Parse, ParseError, ValidationError};
use apiproxy_store::StoreError;
use serde::Serialize;

use crate::cmd::config::read_records;
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::OutputArgs;

#[derive(Serialize)]
struct ValidateResult {
    valid: bool,
    kind: &'static str,
    names: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

pub async fn validate_cmd(path: &Path, templates: bool, output: OutputArgs) -> i32 {
    let (format, data) = match read_records(path, &output) {
        Ok(v) => v,
        Err(code) => return code,
    };

    let checked = if templates {
        parse_templates(&data, format).map(|records| {
            check_all(records, |t| t.name.clone(), |t| t.parse().map_err(|e| e.to_string()))
        })
    } else {
        parse_definitions(&data, format).map(|records| {
            check_all(records, |d| d.name.clone(), |d| {
                if d.name.trim().is_empty() {
                    return Err(ValidationError::MissingName.to_string());
                }
                d.parse().map_err(|e| e.to_string())
            })
        })
    };

    let (names, errors) = match checked {
        Ok(v) => v,
        Err(e) => {
            print_error(output.format, output.quiet, &parse_failure(&e));
            return exit_codes::VALIDATION_FAILED;
        }
    };

    let kind = if templates { "templates" } else { "definitions" };
    let result = ValidateResult {
        valid: errors.is_empty(),
        kind,
        names,
        errors,
    };

    if output.format == OutputFormat::Text && !output.quiet {
        if result.valid {
            println!("ok: {} valid {kind}", result.names.len());
            for name in &result.names {
                println!("- {name}");
            }
        } else {
            eprintln!("error: validation failed");
            for e in &result.errors {
                eprintln!("- {e}");
            }
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    if result.valid {
        exit_codes::SUCCESS
    } else {
        exit_codes::VALIDATION_FAILED
    }
}

/// Validates every record, collecting names of the good ones and one message per bad one.
/// A name already taken by an earlier valid record is reported the way registration would.
fn check_all<T>(
    records: Vec<T>,
    name_of: impl Fn(&T) -> String,
    check: impl Fn(&mut T) -> Result<(), String>,
) -> (Vec<String>, Vec<String>) {
    let mut names = Vec::new();
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for (i, mut record) in records.into_iter().enumerate() {
        let name = name_of(&record);
        let checked = check(&mut record).and_then(|()| {
            if seen.insert(name.clone()) {
                Ok(())
            } else {
                Err(StoreError::AlreadyExists(name.clone()).to_string())
            }
        });
        match checked {
            Ok(()) => names.push(name),
            Err(e) => errors.push(format!("record {i} ({name:?}): {e}")),
        }
    }
    (names, errors)
}

fn parse_failure(e: &ParseError) -> String {
    match e {
        ParseError::Json(e) => format!("JSON parse failed: {e}"),
        ParseError::Yaml(e) => format!("YAML parse failed: {e}"),
        ParseError::UnsupportedFormat(f) => format!("unsupported data type: {f}"),
    }
}
