use std::path::Path;

use crate::cmd::config::exit_code_for;
use crate::cmd::template::load_templates;
use crate::exit_codes;
use crate::output::{print_error, print_result};
use crate::{OutputArgs, VarsArgs};

pub async fn render_cmd(name: &str, file: &Path, vars: VarsArgs, output: OutputArgs) -> i32 {
    let (registry, vars) = match load_templates(file, &vars, &output) {
        Ok(v) => v,
        Err(code) => return code,
    };
    match registry.render_template(name, &vars) {
        Ok(def) => {
            print_result(output.format, output.quiet, &def);
            exit_codes::SUCCESS
        }
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            exit_code_for(&e)
        }
    }
}
