use std::collections::BTreeMap;

use apiproxy_exec::HttpResponseParts;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn print_result<T: Serialize>(format: OutputFormat, quiet: bool, result: &T) {
    if quiet {
        return;
    }
    let json = match format {
        OutputFormat::Text => serde_json::to_string_pretty(result),
        OutputFormat::Json => serde_json::to_string(result),
    };
    if let Ok(json) = json {
        println!("{json}");
    }
}

pub fn print_error(format: OutputFormat, quiet: bool, message: &str) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => eprintln!("error: {message}"),
        OutputFormat::Json => {
            let err = serde_json::json!({"error": message});
            eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
        }
    }
}

#[derive(Serialize)]
struct ResponseView<'a> {
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    media_type: Option<String>,
    headers: &'a BTreeMap<String, String>,
    body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// Text mode prints the body as-is; JSON mode wraps status, headers and body.
pub fn print_response(format: OutputFormat, quiet: bool, resp: &HttpResponseParts, error: Option<&str>) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => {
            let body = resp.text();
            if body.ends_with('\n') {
                print!("{body}");
            } else if !body.is_empty() {
                println!("{body}");
            }
            if let Some(error) = error {
                eprintln!("error: {error}");
            }
        }
        OutputFormat::Json => {
            let view = ResponseView {
                status: resp.status,
                media_type: resp.media_type(),
                headers: &resp.headers,
                body: resp.text(),
                error,
            };
            print_result(format, quiet, &view);
        }
    }
}
