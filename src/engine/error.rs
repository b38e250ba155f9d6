//! Errors collected by the executor.
//!
//! Nothing here aborts a run: setup errors drop the offending request or
//! path, per-replay errors skip the replay, and per-analyzer errors blank a
//! single cell.

use std::path::PathBuf;

use thiserror::Error;

use crate::analyzer::AnalyzerError;
use crate::output::OutputError;
use crate::replay::DecodeError;

/// Which evaluation phase an analyzer failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Metadata,
    Commands,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::Metadata => "reading replay metadata",
            Phase::Commands => "reading commands",
        })
    }
}

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("analyzer {0:?} not found; ignoring")]
    UnknownAnalyzer(String),

    #[error("invalid arguments for analyzer {analyzer}: {source}; ignoring")]
    InvalidArguments {
        analyzer: String,
        #[source]
        source: AnalyzerError,
    },

    #[error("replay path not found: {}", .0.display())]
    ReplayNotFound(PathBuf),

    #[error("cannot access replay path {}: {source}", .path.display())]
    ReplayPathUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("copy directory doesn't exist: {}", .0.display())]
    CopyDirMissing(PathBuf),

    #[error("cannot use copy directory {}: {reason}", .path.display())]
    CopyDirUnusable { path: PathBuf, reason: String },

    #[error("failed to parse replay: {0}")]
    Parse(#[from] DecodeError),

    #[error("recovered from panic computing stats for {}: {message}", .replay.display())]
    ComputePanic { replay: PathBuf, message: String },

    #[error("error {phase} of {} with analyzer {analyzer}: {source}", .replay.display())]
    Analyzer {
        replay: PathBuf,
        analyzer: String,
        phase: Phase,
        #[source]
        source: AnalyzerError,
    },

    #[error("error copying replay {} to {}: {source}", .replay.display(), .dest.display())]
    Copy {
        replay: PathBuf,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("output error: {0}")]
    Output(#[from] OutputError),
}

impl ExecError {
    /// Errors found while building the executor, before any replay is read.
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            ExecError::UnknownAnalyzer(_)
                | ExecError::InvalidArguments { .. }
                | ExecError::ReplayNotFound(_)
                | ExecError::ReplayPathUnreadable { .. }
                | ExecError::CopyDirMissing(_)
                | ExecError::CopyDirUnusable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = ExecError::Analyzer {
            replay: PathBuf::from("a.rep"),
            analyzer: "my-race".to_string(),
            phase: Phase::Metadata,
            source: AnalyzerError::MePlayerNotFound,
        };
        assert_eq!(
            e.to_string(),
            "error reading replay metadata of a.rep with analyzer my-race: -me player not present in this replay"
        );
        assert!(!e.is_setup());

        let e = ExecError::UnknownAnalyzer("nope".to_string());
        assert_eq!(e.to_string(), "analyzer \"nope\" not found; ignoring");
        assert!(e.is_setup());
    }
}
