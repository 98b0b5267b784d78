use std::path::Path;

use crate::cmd::config::{build_registry, exit_code_for, read_records, report_run};
use crate::output::print_error;
use crate::OutputArgs;

pub async fn run_cmd(name: &str, file: &Path, output: OutputArgs) -> i32 {
    let (format, data) = match read_records(file, &output) {
        Ok(v) => v,
        Err(code) => return code,
    };
    let registry = match build_registry(&output) {
        Ok(r) => r,
        Err(code) => return code,
    };
    if let Err(e) = registry.register_definitions_data(format, &data) {
        print_error(output.format, output.quiet, &e.to_string());
        return exit_code_for(&e);
    }

    report_run(registry.run_by_name(name).await, &output)
}
