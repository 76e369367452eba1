mod commands;

use clap::{Args, Parser, Subcommand};
use colink_config::{RawInputs, SyncConfig, resolve_config};
use colink_core::{ExitCode, LinkError, LinkResult};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "colink",
    version,
    about = "Mirror GitHub project columns into another column",
    arg_required_else_help = true
)]
struct Cli {
    #[arg(long, global = true)]
    json: bool,

    #[arg(long, global = true)]
    no_color: bool,

    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Reconcile the target column with the source columns once.
    Sync(InputArgs),
    /// Print the resolved configuration without contacting GitHub.
    Config(InputArgs),
}

/// Inputs given on the command line. They override the config file and
/// `INPUT_*` environment variables.
#[derive(Debug, Clone, Default, Args)]
struct InputArgs {
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(long = "source-column-id", value_name = "ID")]
    source_column_ids: Vec<String>,

    #[arg(long, value_name = "ID")]
    target_column_id: Option<String>,

    #[arg(long, value_name = "TOKEN")]
    github_token: Option<String>,

    #[arg(long, value_name = "TYPE")]
    type_filter: Option<String>,

    #[arg(long, value_name = "PATTERNS")]
    content_filter: Option<String>,

    #[arg(long, value_name = "LABELS")]
    label_filter: Option<String>,

    #[arg(long, value_name = "STATE")]
    state_filter: Option<String>,

    #[arg(long)]
    automation_notice: bool,

    #[arg(long)]
    source_column_notices: bool,

    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

impl InputArgs {
    fn to_inputs(&self) -> RawInputs {
        let mut inputs = RawInputs::new();

        if !self.source_column_ids.is_empty() {
            inputs.set("source_column_id", self.source_column_ids.join(","));
        }

        let optional = [
            ("target_column_id", &self.target_column_id),
            ("github_token", &self.github_token),
            ("type_filter", &self.type_filter),
            ("content_filter", &self.content_filter),
            ("label_filter", &self.label_filter),
            ("state_filter", &self.state_filter),
            ("github_api_url", &self.api_url),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                inputs.set(name, value.as_str());
            }
        }

        // an unset switch must not turn off a value from the file or env
        if self.automation_notice {
            inputs.set("automation_notice", "true");
        }
        if self.source_column_notices {
            inputs.set("source_column_notices", "true");
        }

        inputs
    }

    /// Layers the config file, the environment and these flags, in that
    /// order, and resolves the result.
    fn resolve(&self) -> LinkResult<SyncConfig> {
        let mut inputs = match &self.config {
            Some(path) => RawInputs::load_file(path)?,
            None => RawInputs::new(),
        };
        inputs.merge(RawInputs::from_env());
        inputs.merge(self.to_inputs());

        resolve_config(&inputs)
    }
}

#[derive(Debug, Clone, Copy)]
struct GlobalOptions {
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    configure_logging(cli.debug, cli.json, cli.no_color);

    let globals = GlobalOptions { json: cli.json };

    let result = run_command(cli.command, &globals);

    let exit = match result {
        Ok(code) => code,
        Err(error) => {
            render_error(&error, globals.json);
            error.exit_code()
        }
    };

    std::process::exit(exit.as_i32());
}

fn configure_logging(debug: bool, json: bool, no_color: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_ansi(!no_color)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run_command(command: Command, globals: &GlobalOptions) -> LinkResult<ExitCode> {
    match command {
        Command::Sync(args) => commands::sync::cmd_sync(&args.resolve()?, globals),
        Command::Config(args) => commands::config::cmd_config(&args.resolve()?, globals),
    }
}

fn render_error(error: &LinkError, json_output: bool) {
    if json_output {
        let payload = json!({
            "ok": false,
            "error": {
                "kind": error.kind,
                "message": &error.message,
            }
        });
        let serialized = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| {
            "{\"ok\":false,\"error\":{\"kind\":\"io\",\"message\":\"failed to serialize error\"}}".to_string()
        });
        eprintln!("{serialized}");
    } else {
        eprintln!("error: {}", error.message);
    }
}

fn print_json<T: Serialize>(value: &T) -> LinkResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| LinkError::io(format!("failed to render JSON output: {err}")))?;
    println!("{rendered}");
    Ok(())
}
