use std::path::Path;

use apiproxy_core::Vars;
use apiproxy_exec::Registry;

use crate::cmd::config::{build_registry, exit_code_for, load_vars, read_records, report_run};
use crate::output::print_error;
use crate::{OutputArgs, VarsArgs};

pub async fn api_template_cmd(name: &str, file: &Path, vars: VarsArgs, output: OutputArgs) -> i32 {
    let (registry, vars) = match load_templates(file, &vars, &output) {
        Ok(v) => v,
        Err(code) => return code,
    };
    report_run(registry.run_template_by_name(name, &vars).await, &output)
}

/// Registers every template in `file` and resolves the command-line variables.
pub fn load_templates(
    file: &Path,
    vars: &VarsArgs,
    output: &OutputArgs,
) -> Result<(Registry, Vars), i32> {
    let (format, data) = read_records(file, output)?;
    let vars = load_vars(vars, output)?;
    let registry = build_registry(output)?;
    if let Err(e) = registry.register_templates_data(format, &data) {
        print_error(output.format, output.quiet, &e.to_string());
        return Err(exit_code_for(&e));
    }
    Ok((registry, vars))
}
