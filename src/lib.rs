//! Raszagal - replay analyzer execution engine.
//!
//! Raszagal runs a set of small, pluggable analyzers over StarCraft: Brood
//! War replays and produces one row of results per replay. Each analyzer
//! answers one question ("what race did I play?", "when did my Spawning Pool
//! start?"). Boolean analyzers double as filters that decide whether a replay
//! is reported at all.
//!
//! # Architecture
//!
//! - `replay`: replay model and the decoder seam (screp JSON dumps)
//! - `analyzer`: the analyzer contract, builtins and the catalog
//! - `engine`: request binding, wrapper scheduling and the executor
//! - `output`: CSV and JSON sinks
//! - `config`: YAML config schema and discovery
//! - `cli`: command-line interface
//!
//! # Adding an Analyzer
//!
//! Implement the `Analyzer` trait, then either add it to
//! `analyzer::builtin::all` or register it in your own `Catalog`.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod engine;
pub mod output;
pub mod replay;

pub use analyzer::{Analyzer, AnalyzerContext, AnalyzerError, Catalog};
pub use config::Config;
pub use engine::{AnalyzerRequest, ExecError, Executor, ExecutorBuilder, FilterMode};
pub use output::{Output, OutputFormat};
pub use replay::{Replay, ReplayDecoder, ScrepJsonDecoder};
