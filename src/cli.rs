//! Command-line interface for raszagal.

use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::{parser::ValueSource, Arg, ArgAction, ArgMatches, CommandFactory, Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::{debug, warn};

use crate::analyzer::{units, Analyzer, AnalyzerContext, Catalog};
use crate::config::{self, Config};
use crate::engine::{collect_replay_dir, AnalyzerRequest, ExecutorBuilder, FilterMode};
use crate::output::{self, OutputFormat};
use crate::replay::ScrepJsonDecoder;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Name of the analyze subcommand, which also carries the analyzer flags.
pub const ANALYZE: &str = "analyze";

const ANALYZER_HEADING: &str = "Analyzers";

/// Bundled config written by `raszagal init`.
const DEFAULT_TEMPLATE: &str = include_str!("templates/default.yaml");

/// Replay analyzer for StarCraft: Brood War.
///
/// Raszagal runs a set of analyzers over replay dumps and prints one row per
/// replay. Boolean analyzers can also be used as filters, and replays that
/// pass every filter can be copied to a directory.
#[derive(Parser)]
#[command(name = "raszagal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run analyzers over replays
    #[command(visible_alias = "run")]
    Analyze(AnalyzeArgs),
    /// List available analyzers
    List(ListArgs),
    /// Create a raszagal config file
    Init(InitArgs),
}

/// Arguments for the analyze command.
///
/// Analyzer flags (`--my-race`, `--filter--is-1v1`, ...) are added at runtime
/// by [`command`].
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Replay file to analyze (repeatable)
    #[arg(long, value_name = "FILE")]
    pub replay: Vec<PathBuf>,

    /// Comma-separated replay files
    #[arg(long, value_name = "FILES", value_delimiter = ',')]
    pub replays: Vec<PathBuf>,

    /// Directory searched recursively for replays (repeatable)
    #[arg(long, value_name = "DIR")]
    pub replay_dir: Vec<PathBuf>,

    /// Comma-separated player names that identify you
    #[arg(long, value_name = "NAMES")]
    pub me: Option<String>,

    /// Output format: csv, json, or none
    #[arg(short, long)]
    pub output: Option<OutputFormat>,

    /// Copy replays that pass every filter into this directory
    #[arg(long = "copy-to-if-matches-filters", value_name = "DIR")]
    pub copy_to: Option<PathBuf>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Arguments for the list command.
#[derive(Parser)]
pub struct ListArgs {
    /// List unit names accepted by unit arguments instead
    #[arg(long)]
    pub units: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "raszagal.yaml")]
    pub output: PathBuf,
}

/// Flag ids for one analyzer: the plain column flag and, for boolean
/// analyzers, its filter variants.
fn analyzer_flags(analyzer: &dyn Analyzer) -> Vec<(FilterMode, String)> {
    let modes: &[FilterMode] = if analyzer.is_boolean_result() {
        &[FilterMode::Column, FilterMode::Filter, FilterMode::FilterNot]
    } else {
        &[FilterMode::Column]
    };
    modes
        .iter()
        .map(|mode| (*mode, format!("{}{}", mode.prefix(), analyzer.name())))
        .collect()
}

fn analyzer_arg(analyzer: &dyn Analyzer, mode: FilterMode, id: String) -> Arg {
    let help = match mode {
        FilterMode::Column => analyzer.description().to_string(),
        FilterMode::Filter => format!("Keep replays where {} is true", analyzer.name()),
        FilterMode::FilterNot => format!("Drop replays where {} is true", analyzer.name()),
    };
    let arg = Arg::new(id.clone())
        .long(id)
        .help(help)
        .help_heading(ANALYZER_HEADING);
    if analyzer.is_string_flag() {
        arg.value_name("ARGS").action(ArgAction::Append)
    } else {
        arg.action(ArgAction::SetTrue)
    }
}

/// The full command, with one flag per analyzer in `catalog` added to the
/// analyze subcommand.
pub fn command(catalog: &Catalog) -> clap::Command {
    Cli::command().mut_subcommand(ANALYZE, |mut cmd| {
        for analyzer in catalog.iter() {
            for (mode, id) in analyzer_flags(analyzer) {
                cmd = cmd.arg(analyzer_arg(analyzer, mode, id));
            }
        }
        cmd
    })
}

/// Analyzer requests given as flags, in command line order.
pub fn requests_from_matches(matches: &ArgMatches, catalog: &Catalog) -> Vec<AnalyzerRequest> {
    let mut found: Vec<(usize, AnalyzerRequest)> = Vec::new();

    for analyzer in catalog.iter() {
        for (mode, id) in analyzer_flags(analyzer) {
            if matches.value_source(&id) != Some(ValueSource::CommandLine) {
                continue;
            }
            if analyzer.is_string_flag() {
                let values = matches.get_many::<String>(&id).into_iter().flatten();
                let indices = matches.indices_of(&id).into_iter().flatten();
                for (value, index) in values.zip(indices) {
                    let args = value
                        .split(',')
                        .map(str::trim)
                        .filter(|a| !a.is_empty())
                        .map(String::from)
                        .collect();
                    found.push((index, AnalyzerRequest::new(analyzer.name(), args, mode)));
                }
            } else if matches.get_flag(&id) {
                let index = matches.index_of(&id).unwrap_or(0);
                found.push((index, AnalyzerRequest::new(analyzer.name(), Vec::new(), mode)));
            }
        }
    }

    found.sort_by_key(|(index, _)| *index);
    found.into_iter().map(|(_, request)| request).collect()
}

/// Replay files from explicit paths and from scanning directories.
fn collect_replays(args: &AnalyzeArgs, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let decoder = ScrepJsonDecoder::new();
    let excluded = config.excluded_globset()?;

    let mut paths: Vec<PathBuf> = args.replay.iter().chain(&args.replays).cloned().collect();
    for dir in config.replay_dirs.iter().chain(&args.replay_dir) {
        match collect_replay_dir(dir, &decoder, &excluded) {
            Ok(found) => paths.extend(found),
            Err(e) => warn!("skipping replay directory {}: {}", dir.display(), e),
        }
    }
    Ok(paths)
}

fn progress_bar(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {wide_msg}") {
        bar.set_style(style);
    }
    bar
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs, requests: Vec<AnalyzerRequest>) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir()?;
    let (config, config_path) = match config::load(args.config.as_deref(), &cwd) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    if let Some(path) = &config_path {
        debug!("using config {}", path.display());
    }

    // Config analyzers run first; flags add to them.
    let mut all_requests = config.requests()?;
    all_requests.extend(requests);

    let context = match &args.me {
        Some(list) => AnalyzerContext::from_list(list),
        None => AnalyzerContext::new(&config.me),
    };
    let format = args.output.unwrap_or_else(|| config.output_format());
    let copy_to = args.copy_to.clone().or_else(|| config.copy_to.clone());

    let paths = collect_replays(args, &config)?;
    if paths.is_empty() {
        warn!("no replays to analyze");
    }

    let stdout = io::stdout();
    let writer = BufWriter::new(stdout.lock());

    let mut builder = ExecutorBuilder::new(paths)
        .requests(all_requests)
        .context(context)
        .output(output::for_format(format, writer))
        .progress(progress_bar(!args.no_progress));
    if let Some(dir) = copy_to {
        builder = builder.copy_to(dir);
    }

    let (mut executor, setup_errors) = builder.build();
    for e in &setup_errors {
        warn!("{}", e);
    }

    let errors = executor.execute();
    for e in &errors {
        warn!("{}", e);
    }

    Ok(EXIT_SUCCESS)
}

fn flag_usage(analyzer: &dyn Analyzer, prefix: &str) -> String {
    if analyzer.is_string_flag() {
        format!("--{}{} <ARGS>", prefix, analyzer.name())
    } else {
        format!("--{}{}", prefix, analyzer.name())
    }
}

/// Run the list command.
pub fn run_list(args: &ListArgs, catalog: &Catalog) -> anyhow::Result<i32> {
    if args.units {
        for name in units::unit_names() {
            println!("{}", name);
        }
        return Ok(EXIT_SUCCESS);
    }

    println!("{}", "Available analyzers:".bold());
    println!();

    for analyzer in catalog.iter() {
        println!("  {}", flag_usage(analyzer, "").cyan().bold());
        println!("      {}", analyzer.description());
        if analyzer.is_boolean_result() {
            println!(
                "      {} {}",
                "filters:".dimmed(),
                format!(
                    "{}, {}",
                    flag_usage(analyzer, FilterMode::Filter.prefix()),
                    flag_usage(analyzer, FilterMode::FilterNot.prefix())
                )
                .dimmed()
            );
        }
    }

    println!();
    println!("Usage:");
    println!("  raszagal analyze --replay-dir <DIR> --me <NAME> --my-race --filter--is-1v1");

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    let path = &args.output;
    if path.exists() {
        eprintln!(
            "Error: {} already exists; pass --output to write somewhere else",
            path.display()
        );
        return Ok(EXIT_ERROR);
    }

    let written = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
    .and_then(|()| std::fs::write(path, DEFAULT_TEMPLATE));
    if let Err(e) = written {
        eprintln!("Error: cannot write {}: {}", path.display(), e);
        return Ok(EXIT_ERROR);
    }

    println!("Wrote {}", path.display());
    println!(
        "List your player names under 'me', then run: raszagal analyze --config {}",
        path.display()
    );
    Ok(EXIT_SUCCESS)
}
