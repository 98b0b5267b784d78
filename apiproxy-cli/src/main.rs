use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "apiproxy", version, about = "Run HTTP request definitions with endpoint failover")]
struct Cli {
    /// Log at debug level unless APIPROXY_LOG or RUST_LOG says otherwise.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = std::env::var("APIPROXY_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Api {
            urls,
            request,
            output,
        } => cmd::api::api_cmd(urls, request, output).await,
        Command::Run { name, file, output } => cmd::run::run_cmd(&name, &file, output).await,
        Command::ApiTemplate {
            name,
            file,
            vars,
            output,
        } => cmd::template::api_template_cmd(&name, &file, vars, output).await,
        Command::Validate {
            path,
            templates,
            output,
        } => cmd::validate::validate_cmd(&path, templates, output).await,
        Command::Render {
            name,
            file,
            vars,
            output,
        } => cmd::render::render_cmd(&name, &file, vars, output).await,
    }
}
