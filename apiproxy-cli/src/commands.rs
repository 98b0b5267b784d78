use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send an ad-hoc request; several URLs enable failover.
    Api {
        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,
        #[command(flatten)]
        request: RequestArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Load definitions from a file and run one by name.
    Run {
        name: String,
        #[arg(short = 'f', long)]
        file: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Load templates from a file, render one and run it.
    ApiTemplate {
        name: String,
        #[arg(short = 't', long = "template")]
        file: PathBuf,
        #[command(flatten)]
        vars: VarsArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Parse and validate every record in a file.
    Validate {
        path: PathBuf,
        #[arg(long)]
        templates: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the definition a template renders to, without sending it.
    Render {
        name: String,
        #[arg(short = 't', long = "template")]
        file: PathBuf,
        #[command(flatten)]
        vars: VarsArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}
