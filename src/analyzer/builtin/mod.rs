//! Builtin analyzers.
//!
//! Most builtins answer from the header alone. Those share one
//! implementation, [`MetadataAnalyzer`], driven by a static [`MetadataSpec`]
//! table. Analyzers that need the command stream have their own types.

mod basic;
mod matchup;
mod timings;

use std::path::Path;

use super::{args, Analyzer, AnalyzerContext, AnalyzerError};
use crate::replay::{Command, Race, Replay};

pub use timings::FirstUnitSeconds;

/// A bound, normalized analyzer argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    None,
    Race(Race),
    Minutes(i64),
    Matchup([char; 2]),
}

type Bind = fn(&[String]) -> Result<Param, AnalyzerError>;
type Evaluate = fn(Param, &Replay, &AnalyzerContext, &Path) -> Result<String, AnalyzerError>;

/// Static description of a header-only analyzer.
pub struct MetadataSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub string_flag: bool,
    pub boolean_result: bool,
    bind: Bind,
    evaluate: Evaluate,
}

fn bind_none(_: &[String]) -> Result<Param, AnalyzerError> {
    Ok(Param::None)
}

fn bind_race(a: &[String]) -> Result<Param, AnalyzerError> {
    args::race(a).map(Param::Race)
}

fn bind_minutes(a: &[String]) -> Result<Param, AnalyzerError> {
    args::minutes(a).map(Param::Minutes)
}

fn bind_matchup(a: &[String]) -> Result<Param, AnalyzerError> {
    args::matchup(a).map(Param::Matchup)
}

/// Analyzer that finishes during the metadata phase.
#[derive(Clone)]
pub struct MetadataAnalyzer {
    spec: &'static MetadataSpec,
    param: Param,
    result: String,
    done: bool,
}

impl MetadataAnalyzer {
    pub fn new(spec: &'static MetadataSpec) -> Self {
        Self {
            spec,
            param: Param::None,
            result: String::new(),
            done: false,
        }
    }
}

impl Analyzer for MetadataAnalyzer {
    fn name(&self) -> &'static str {
        self.spec.name
    }

    fn description(&self) -> &'static str {
        self.spec.description
    }

    fn is_string_flag(&self) -> bool {
        self.spec.string_flag
    }

    fn is_boolean_result(&self) -> bool {
        self.spec.boolean_result
    }

    fn set_arguments(&mut self, args: &[String]) -> Result<(), AnalyzerError> {
        self.param = (self.spec.bind)(args)?;
        Ok(())
    }

    fn start_reading_replay(
        &mut self,
        replay: &Replay,
        ctx: &AnalyzerContext,
        replay_path: &Path,
    ) -> Result<bool, AnalyzerError> {
        self.done = true;
        match (self.spec.evaluate)(self.param, replay, ctx, replay_path) {
            Ok(result) => {
                self.result = result;
                Ok(true)
            }
            Err(e) => {
                self.result.clear();
                Err(e)
            }
        }
    }

    fn process_command(&mut self, _command: &Command) -> Result<bool, AnalyzerError> {
        Ok(true)
    }

    fn is_done(&self) -> (&str, bool) {
        (&self.result, self.done)
    }
}

fn bool_result(value: bool) -> String {
    value.to_string()
}

/// All builtin analyzers, in no particular order.
pub fn all() -> Vec<Box<dyn Analyzer>> {
    let mut analyzers: Vec<Box<dyn Analyzer>> = basic::SPECS
        .iter()
        .chain(matchup::SPECS.iter())
        .map(|spec| Box::new(MetadataAnalyzer::new(spec)) as Box<dyn Analyzer>)
        .collect();
    analyzers.push(Box::new(FirstUnitSeconds::any_unit()));
    analyzers.push(Box::new(FirstUnitSeconds::spawning_pool()));
    analyzers
}

#[cfg(test)]
pub(crate) mod testing {
    //! Helpers for exercising builtins against hand-built replays.

    use super::*;
    use crate::replay::{Header, Player};

    pub fn player(id: u8, name: &str, race: Race, team: u8) -> Player {
        Player {
            id,
            name: name.to_string(),
            race,
            team,
            observer: false,
        }
    }

    pub fn replay(players: Vec<Player>) -> Replay {
        Replay {
            header: Header {
                players,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Bind `args`, run the metadata phase and return the result.
    pub fn run(
        analyzer: &mut dyn Analyzer,
        args: &[&str],
        replay: &Replay,
        me: &str,
    ) -> Result<String, AnalyzerError> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        analyzer.set_arguments(&args)?;
        let ctx = AnalyzerContext::from_list(me);
        analyzer.start_reading_replay(replay, &ctx, Path::new("/replays/game.rep"))?;
        Ok(analyzer.is_done().0.to_string())
    }

    pub fn by_name(name: &str) -> Box<dyn Analyzer> {
        all()
            .into_iter()
            .find(|a| a.name() == name)
            .unwrap_or_else(|| panic!("no builtin named {name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_names_unique() {
        let analyzers = all();
        let names: HashSet<&str> = analyzers.iter().map(|a| a.name()).collect();
        assert_eq!(names.len(), analyzers.len());
    }

    #[test]
    fn test_metadata_analyzer_error_clears_result() {
        let mut a = by_name("my-name");
        let r = replay(vec![player(0, "someone", Race::Zerg, 1)]);

        assert_eq!(run(a.as_mut(), &[], &r, "someone").unwrap(), "someone");
        let err = run(a.as_mut(), &[], &r, "nobody").unwrap_err();
        assert_eq!(err, AnalyzerError::MePlayerNotFound);
        assert_eq!(a.is_done(), ("", true));
    }

    #[test]
    fn test_clones_are_independent() {
        let mut zerg = by_name("my-race-is");
        zerg.set_arguments(&["Zerg".to_string()]).unwrap();
        let mut terran = zerg.clone_box();
        terran.set_arguments(&["Terran".to_string()]).unwrap();

        let r = replay(vec![player(0, "me", Race::Zerg, 1)]);
        let ctx = AnalyzerContext::from_list("me");
        let path = Path::new("x.rep");
        zerg.start_reading_replay(&r, &ctx, path).unwrap();
        terran.start_reading_replay(&r, &ctx, path).unwrap();

        assert_eq!(zerg.is_done().0, "true");
        assert_eq!(terran.is_done().0, "false");
    }
}
