//! Raszagal CLI entry point.

use std::io::IsTerminal;

use clap::FromArgMatches;
use raszagal::analyzer::Catalog;
use raszagal::cli::{self, Cli, Commands, ANALYZE, EXIT_ERROR};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Log level comes from RASZAGAL_LOG, defaulting to warn (debug with --verbose).
fn init_logging(verbose: bool) {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var("RASZAGAL_LOG")
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let catalog = Catalog::builtin();
    let matches = cli::command(catalog).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Analyze(args) => {
            let requests = matches
                .subcommand_matches(ANALYZE)
                .map(|sub| cli::requests_from_matches(sub, catalog))
                .unwrap_or_default();
            cli::run_analyze(args, requests)
        }
        Commands::List(args) => cli::run_list(args, catalog),
        Commands::Init(args) => cli::run_init(args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
