#![forbid(unsafe_code)]

mod cmd;
mod config;
mod graph_file;
mod output;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "arbor: edge-classifying graph search and cycle finding",
    long_about = None
)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format.
    #[arg(long, global = true, value_enum, value_name = "FORMAT")]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file (default: `$ARBOR_CONFIG`, then the user config dir).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Find one cycle",
        long_about = "Find a cycle in a graph file: the first one found, a shortest one, \
                      one of a given parity, or one through a given vertex.",
        after_help = "EXAMPLES:\n    # Any cycle\n    arbor cycle graph.txt\n\n    # Shortest odd cycle through vertex a\n    arbor cycle graph.txt --shortest --odd --through a\n\n    # Treat an edge list as directed\n    arbor cycle deps.txt --directed --json"
    )]
    Cycle(cmd::cycle::CycleArgs),

    #[command(
        about = "Report whether a graph has a cycle",
        after_help = "EXAMPLES:\n    arbor check graph.json\n    arbor check deps.txt --directed --format text"
    )]
    Check(cmd::check::CheckArgs),

    #[command(
        about = "Run a traversal and print classified edges",
        long_about = "Run a breadth- or depth-first traversal and print every tree, back and \
                      cross edge, the search forest, and a summary.",
        after_help = "EXAMPLES:\n    # Depth-first from vertex a\n    arbor search graph.txt --dfs --from a\n\n    # Stop below level 2\n    arbor search graph.txt --limit-level 2 --json"
    )]
    Search(cmd::search::SearchArgs),

    #[command(
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    arbor completions bash\n    arbor completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

/// Default filter for the verbosity flags, unless `ARBOR_LOG` is set.
fn default_filter(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose || env::var_os("DEBUG").is_some() {
        "arbor=debug,info"
    } else {
        "arbor=info,warn"
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env("ARBOR_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));

    let format = env::var("ARBOR_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: Cli, output: OutputMode, config: &config::Config) -> anyhow::Result<()> {
    match cli.command {
        Commands::Cycle(ref args) => cmd::cycle::run_cycle(args, output, config),
        Commands::Check(ref args) => cmd::check::run_check(args, output, config),
        Commands::Search(ref args) => cmd::search::run_search(args, output, config),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let loaded = config::load(cli.config.as_deref());
    let config_output = loaded
        .as_ref()
        .ok()
        .and_then(|config| config.output.as_deref());
    let output = resolve_output_mode(cli.format, cli.json, config_output);
    debug!(?output, "output mode resolved");

    let result = loaded.and_then(|config| run(cli, output, &config));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            if render_error(output, &CliError::from_anyhow(&err)).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}
