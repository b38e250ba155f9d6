//! Replay analyzers.
//!
//! An analyzer answers one question about a replay ("what race did I play",
//! "when did I place my Spawning Pool"). See [`Analyzer`] for the contract
//! and [`Catalog::builtin`] for what ships with the crate.
//!
//! # Adding an analyzer
//!
//! Header-only analyzers are a row in one of the `MetadataSpec` tables under
//! `builtin/`. Analyzers that need commands implement [`Analyzer`] directly
//! and are added to `builtin::all`.

pub mod args;
pub mod builtin;
pub mod catalog;
pub mod traits;
pub mod units;

pub use catalog::Catalog;
pub use traits::{Analyzer, AnalyzerClone, AnalyzerContext, AnalyzerError};
