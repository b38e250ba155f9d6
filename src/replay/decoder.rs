//! Replay decoding seam.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Replay;

/// Errors produced while decoding a replay file.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("decoding {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Turns replay files into [`Replay`] values.
///
/// The engine only relies on this trait, so any replay format can be plugged
/// in by implementing it.
pub trait ReplayDecoder {
    /// File name suffixes this decoder accepts, including the dot.
    fn suffixes(&self) -> &'static [&'static str];

    /// Decode one replay file.
    fn parse_file(&self, path: &Path) -> Result<Replay, DecodeError>;

    /// Fill in derived statistics. Implementations may panic on malformed
    /// input; callers are expected to guard this call.
    fn compute(&self, replay: &mut Replay) {
        replay.compute();
    }

    /// Check whether a path names a replay this decoder handles.
    ///
    /// The file name must end with one of [`suffixes`](Self::suffixes) and
    /// have a non-empty stem.
    fn handles_path(&self, path: &Path) -> bool {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => return false,
        };
        self.suffixes()
            .iter()
            .any(|suffix| name.len() > suffix.len() && name.ends_with(suffix))
    }
}

/// Decoder for the JSON dumps written by `screp -cmds -computed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrepJsonDecoder;

impl ScrepJsonDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl ReplayDecoder for ScrepJsonDecoder {
    fn suffixes(&self) -> &'static [&'static str] {
        &[".json"]
    }

    fn parse_file(&self, path: &Path) -> Result<Replay, DecodeError> {
        let file = File::open(path).map_err(|source| DecodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| DecodeError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}
