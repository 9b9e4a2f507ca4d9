use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rpcrun_client::{last_used, Client, ClientConfig, LastUsed};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rpcrun", about = "Run commands on a remote rpcrun server")]
struct Args {
    /// Server address as host[:port] (uses the last one if not specified)
    #[arg(short, long, env = "RPCRUN_DEST", global = true)]
    dest: Option<String>,
    /// Authorization code (uses the last one if not specified)
    #[arg(short, long, env = "RPCRUN_AUTHCODE", global = true)]
    authcode: Option<String>,
    /// File holding last-used values
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a shell command through the /rpc endpoint
    Run {
        /// Command to run (reuses the last one if empty)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Run a server-side shortcode through the /code endpoint
    Code {
        /// Shortcode name (reuses the last one if not specified)
        shortcode: Option<String>,
    },
    /// Show remembered values
    Last,
}

fn remember(values: &LastUsed, path: &Path) {
    if let Err(e) = values.save(path) {
        warn!("Could not save last-used values: {e}");
    }
}

fn print_output(output: &str) {
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
}

/// What a `run` or `code` invocation resolved to
#[derive(Debug, PartialEq, Eq)]
enum Call {
    Command(String),
    Code(String),
}

#[derive(Debug)]
struct Plan {
    config: ClientConfig,
    call: Call,
    /// Values to remember, saved before the call is made
    remembered: LastUsed,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Fill missing flags and arguments from `last`. Returns `None` for `last`.
fn plan(args: Args, last: &LastUsed) -> Option<Plan> {
    let dest = args.dest.or_else(|| last.dest.clone()).unwrap_or_default();
    let authcode = args.authcode.or_else(|| last.authcode.clone());
    let mut remembered = last.clone();
    if let Some(dest) = non_empty(&dest) {
        remembered.dest = Some(dest);
    }

    match args.command {
        Command::Last => None,
        Command::Run { command } => {
            let command = if command.is_empty() {
                last.command.clone().unwrap_or_default()
            } else {
                command.join(" ")
            };
            remembered.authcode = authcode.clone();
            if let Some(command) = non_empty(&command) {
                remembered.command = Some(command);
            }
            Some(Plan {
                config: ClientConfig {
                    endpoint_address: dest,
                    authcode,
                },
                call: Call::Command(command),
                remembered,
            })
        }
        Command::Code { shortcode } => {
            let code = shortcode.or_else(|| last.code.clone()).unwrap_or_default();
            if let Some(code) = non_empty(&code) {
                remembered.code = Some(code);
            }
            Some(Plan {
                config: ClientConfig::new(dest),
                call: Call::Code(code),
                remembered,
            })
        }
    }
}

fn print_last(last: &LastUsed) {
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    println!("{:<10} {}", "DEST", show(&last.dest));
    println!("{:<10} {}", "AUTHCODE", show(&last.authcode));
    println!("{:<10} {}", "COMMAND", show(&last.command));
    println!("{:<10} {}", "CODE", show(&last.code));
}

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let state_path = args
        .state_file
        .clone()
        .unwrap_or_else(last_used::default_path);
    let last = LastUsed::load(&state_path);

    let Some(plan) = plan(args, &last) else {
        print_last(&last);
        return Ok(ExitCode::SUCCESS);
    };
    remember(&plan.remembered, &state_path);

    let client = Client::new(plan.config);
    let result = match &plan.call {
        Call::Command(command) => client.invoke_command(command).await,
        Call::Code(code) => client.invoke_code(code).await,
    };

    match result {
        Ok(output) => {
            print_output(&output);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
