//! The analyzer plugin contract.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::replay::{Command, Header, Player, Replay};

/// Soft failure of a single analyzer.
///
/// Returned from argument binding or from either evaluation phase. The
/// engine records it and keeps going with the other analyzers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("invalid argument {value:?}: {reason}")]
    InvalidArgument { value: String, reason: String },

    #[error("-me player not present in this replay")]
    MePlayerNotFound,

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AnalyzerError {
    pub fn invalid(value: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalyzerError::InvalidArgument {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Context shared by every analyzer during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzerContext {
    /// Player names that identify "me" (several accounts are common).
    pub me: HashSet<String>,
}

impl AnalyzerContext {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let me = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        Self { me }
    }

    /// Build from a comma-separated list, e.g. `"alice,alice2"`.
    pub fn from_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// First player in header order whose name is one of `me`.
    pub fn find_me<'r>(&self, header: &'r Header) -> Option<&'r Player> {
        header.players.iter().find(|p| self.me.contains(&p.name))
    }
}

/// A replay analyzer.
///
/// An analyzer answers one question about a replay. The engine clones the
/// registered prototype, binds arguments once with
/// [`set_arguments`](Self::set_arguments), and then for every replay works
/// on a fresh clone:
///
/// 1. [`start_reading_replay`](Self::start_reading_replay) with the header and
///    derived stats. Returning `Ok(true)` means the result is final and no
///    commands are needed.
/// 2. [`process_command`](Self::process_command) for each command in order,
///    until it returns `Ok(true)`.
/// 3. [`is_done`](Self::is_done) to read the result.
///
/// Either phase may return an error; the engine then stops calling this
/// analyzer for the current replay and records an empty result.
///
/// Analyzers must not share mutable state between clones.
pub trait Analyzer: AnalyzerClone + Send + Sync {
    /// Unique hyphenated name, used as the CLI flag.
    fn name(&self) -> &'static str;

    /// Human readable description for help output.
    fn description(&self) -> &'static str;

    /// Bumped whenever the analyzer's output changes.
    fn version(&self) -> u32 {
        1
    }

    /// Names of analyzers whose results this one would consume.
    ///
    /// Declared for forward compatibility. The engine does not schedule on it.
    fn depends_on(&self) -> &'static [&'static str] {
        &[]
    }

    /// True when the CLI flag takes a value instead of being a switch.
    fn is_string_flag(&self) -> bool;

    /// True when the result is always `"true"` or `"false"`, which makes the
    /// analyzer usable as a filter.
    fn is_boolean_result(&self) -> bool;

    /// Validate and normalize arguments. Called once, before any replay.
    fn set_arguments(&mut self, args: &[String]) -> Result<(), AnalyzerError>;

    /// Metadata phase. Must not read `replay.commands`.
    fn start_reading_replay(
        &mut self,
        replay: &Replay,
        ctx: &AnalyzerContext,
        replay_path: &Path,
    ) -> Result<bool, AnalyzerError>;

    /// Streaming phase, called once per command while not done.
    fn process_command(&mut self, command: &Command) -> Result<bool, AnalyzerError>;

    /// Current result and whether it is final.
    fn is_done(&self) -> (&str, bool);
}

/// Object-safe cloning for [`Analyzer`] trait objects.
pub trait AnalyzerClone {
    fn clone_box(&self) -> Box<dyn Analyzer>;
}

impl<T> AnalyzerClone for T
where
    T: Analyzer + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn Analyzer> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Analyzer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl fmt::Debug for dyn Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (result, done) = self.is_done();
        f.debug_struct("Analyzer")
            .field("name", &self.name())
            .field("result", &result)
            .field("done", &done)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::Race;

    fn header() -> Header {
        Header {
            players: vec![
                Player {
                    id: 0,
                    name: "opponent".to_string(),
                    race: Race::Terran,
                    team: 1,
                    observer: false,
                },
                Player {
                    id: 1,
                    name: "smurf".to_string(),
                    race: Race::Zerg,
                    team: 2,
                    observer: false,
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_context_from_list_trims() {
        let ctx = AnalyzerContext::from_list(" main , smurf,,");
        assert_eq!(ctx.me.len(), 2);
        assert!(ctx.me.contains("main"));
        assert!(ctx.me.contains("smurf"));
    }

    #[test]
    fn test_find_me() {
        let ctx = AnalyzerContext::from_list("main,smurf");
        assert_eq!(ctx.find_me(&header()).map(|p| p.id), Some(1));

        let nobody = AnalyzerContext::default();
        assert!(nobody.find_me(&header()).is_none());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AnalyzerError::MePlayerNotFound.to_string(),
            "-me player not present in this replay"
        );
        assert_eq!(
            AnalyzerError::invalid("Zorg", "unknown race").to_string(),
            "invalid argument \"Zorg\": unknown race"
        );
    }
}
