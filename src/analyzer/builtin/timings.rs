//! Build-order timing analyzers. These read the command stream.

use std::path::Path;

use crate::analyzer::{args, units, Analyzer, AnalyzerContext, AnalyzerError};
use crate::replay::{Command, CommandKind, Replay};

const NOT_SEEN: &str = "-1";

/// Second at which the -me player first built, trained or morphed a unit.
///
/// The result stays `-1` when the unit never shows up, or when the -me
/// player is not in the replay.
#[derive(Debug, Clone)]
pub struct FirstUnitSeconds {
    name: &'static str,
    description: &'static str,
    fixed_unit: bool,
    unit_id: u16,
    player_id: Option<u8>,
    result: String,
    done: bool,
}

impl FirstUnitSeconds {
    /// `my-first-specific-unit-seconds`: the unit is given as an argument.
    pub fn any_unit() -> Self {
        Self {
            name: "my-first-specific-unit-seconds",
            description: "Analyzes the second the -me player first built/trained/morphed the specified unit, building or evolution (exact name, see `raszagal list --units`). -1 if it never appears.",
            fixed_unit: false,
            unit_id: 0,
            player_id: None,
            result: NOT_SEEN.to_string(),
            done: false,
        }
    }

    /// `my-spawning-pool-seconds`.
    pub fn spawning_pool() -> Self {
        Self {
            name: "my-spawning-pool-seconds",
            description: "Analyzes the second the -me player first placed a Spawning Pool. -1 if it never appears.",
            fixed_unit: true,
            unit_id: units::SPAWNING_POOL,
            ..Self::any_unit()
        }
    }

    fn creates_unit(&self, command: &Command) -> bool {
        let creates = matches!(
            command.kind,
            CommandKind::Build { .. } | CommandKind::Train { .. } | CommandKind::BuildingMorph { .. }
        );
        creates && command.kind.unit_id() == Some(self.unit_id)
    }
}

impl Analyzer for FirstUnitSeconds {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn is_string_flag(&self) -> bool {
        !self.fixed_unit
    }

    fn is_boolean_result(&self) -> bool {
        false
    }

    fn set_arguments(&mut self, args: &[String]) -> Result<(), AnalyzerError> {
        if !self.fixed_unit {
            self.unit_id = args::unit(args)?;
        }
        Ok(())
    }

    fn start_reading_replay(
        &mut self,
        replay: &Replay,
        ctx: &AnalyzerContext,
        _replay_path: &Path,
    ) -> Result<bool, AnalyzerError> {
        self.result = NOT_SEEN.to_string();
        self.player_id = ctx.find_me(&replay.header).map(|p| p.id);
        self.done = self.player_id.is_none();
        Ok(self.done)
    }

    fn process_command(&mut self, command: &Command) -> Result<bool, AnalyzerError> {
        if Some(command.player_id) == self.player_id && self.creates_unit(command) {
            self.result = command.frame.seconds().to_string();
            self.done = true;
        }
        Ok(self.done)
    }

    fn is_done(&self) -> (&str, bool) {
        (&self.result, self.done)
    }
}
