use apiproxy_core::{Definition, Parse};
use apiproxy_exec::{BackoffConfig, RegistryError};

use crate::cmd::config::{build_executor, report_run};
use crate::exit_codes;
use crate::output::print_error;
use crate::{OutputArgs, RequestArgs};

const ADHOC_NAME: &str = "api";

pub async fn api_cmd(urls: Vec<String>, request: RequestArgs, output: OutputArgs) -> i32 {
    let mut def = Definition {
        name: ADHOC_NAME.to_string(),
        method: request.method,
        body: request.body.unwrap_or_default(),
        ..Default::default()
    };
    if urls.len() == 1 {
        def.url = urls.into_iter().next().unwrap_or_default();
    } else {
        def.urls = urls;
    }

    for raw in &request.headers {
        let Some((k, v)) = raw.split_once(':') else {
            print_error(
                output.format,
                output.quiet,
                &format!("header must look like 'Key: Value', got {raw:?}"),
            );
            return exit_codes::VALIDATION_FAILED;
        };
        def.headers.insert(k.trim().to_string(), v.trim().to_string());
    }

    if let Some(timeout) = request.timeout {
        def.config.timeout = timeout;
    }
    def.config.fallback.selector = request.selector;
    def.config.fallback.retry_codes.extend(request.retry_codes);

    if let Err(e) = def.parse() {
        print_error(output.format, output.quiet, &e.to_string());
        return exit_codes::VALIDATION_FAILED;
    }

    tracing::debug!(method = %def.method, url = %def.url, urls = ?def.urls, "sending ad-hoc request");
    let backoff = BackoffConfig::default().with_retry_max(request.retry_max);
    let executor = match build_executor(&output, backoff) {
        Ok(e) => e,
        Err(code) => return code,
    };
    let result = executor
        .execute(&def)
        .await
        .map_err(RegistryError::from);
    report_run(result, &output)
}
