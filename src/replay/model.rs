//! In-memory replay model.
//!
//! The serde layout follows the JSON dump written by `screp -cmds -computed`
//! (PascalCase keys, nested `Type`/`Race`/`Unit` objects). Only the fields the
//! analyzers read are modeled; everything else in the dump is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Milliseconds per game frame at "fastest" game speed.
pub const FRAME_MILLIS: u64 = 42;

/// A game frame counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frame(pub u32);

impl Frame {
    /// Game time elapsed at this frame.
    pub fn duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0) * FRAME_MILLIS)
    }

    /// Whole seconds elapsed at this frame (truncated).
    pub fn seconds(self) -> u64 {
        u64::from(self.0) * FRAME_MILLIS / 1000
    }
}

/// Player race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Race {
    Zerg,
    Terran,
    Protoss,
    Unknown,
}

impl Race {
    /// Canonical race name as written in replays.
    pub fn name(&self) -> &'static str {
        match self {
            Race::Zerg => "Zerg",
            Race::Terran => "Terran",
            Race::Protoss => "Protoss",
            Race::Unknown => "Unknown",
        }
    }

    /// Single-letter race code used in matchups (e.g. the `Z` in `ZvT`).
    pub fn letter(&self) -> char {
        match self {
            Race::Zerg => 'Z',
            Race::Terran => 'T',
            Race::Protoss => 'P',
            Race::Unknown => 'U',
        }
    }

    /// Parse a canonical race name. Anything unrecognized is `Unknown`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Zerg" => Race::Zerg,
            "Terran" => Race::Terran,
            "Protoss" => Race::Protoss,
            _ => Race::Unknown,
        }
    }
}

impl std::fmt::Display for Race {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Serialize, Deserialize)]
struct RawRace {
    #[serde(rename = "Name")]
    name: String,
}

impl From<RawRace> for Race {
    fn from(raw: RawRace) -> Self {
        Race::from_name(&raw.name)
    }
}

impl From<Race> for RawRace {
    fn from(race: Race) -> Self {
        RawRace {
            name: race.name().to_string(),
        }
    }
}

impl Serialize for Race {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawRace::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Race {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawRace::deserialize(deserializer).map(Race::from)
    }
}

/// A player slot in the replay header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Player {
    #[serde(rename = "ID")]
    pub id: u8,
    pub name: String,
    pub race: Race,
    #[serde(default)]
    pub team: u8,
    #[serde(default)]
    pub observer: bool,
}

/// Replay header: everything known without reading the command stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Header {
    #[serde(default)]
    pub frames: Frame,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub map: String,
    #[serde(default)]
    pub players: Vec<Player>,
}

impl Header {
    /// Game length.
    pub fn duration(&self) -> Duration {
        self.frames.duration()
    }

    /// Players that take part in the game (observers excluded).
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.observer)
    }

    /// Look up a player by slot id.
    pub fn player_by_id(&self, id: u8) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Team-grouped race letters, e.g. `ZPvTT`. Teams appear in ascending
    /// team order and players keep their header order within a team.
    pub fn matchup(&self) -> String {
        let mut teams: BTreeMap<u8, String> = BTreeMap::new();
        for p in self.active_players() {
            teams.entry(p.team).or_default().push(p.race.letter());
        }
        teams.into_values().collect::<Vec<_>>().join("v")
    }
}

/// Discriminated command payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// A worker placed a building.
    Build { unit_id: u16 },
    /// A unit was trained (or, for Zerg, a larva morphed).
    Train { unit_id: u16 },
    /// A Zerg building evolved (Lair, Hive, Sunken Colony...).
    BuildingMorph { unit_id: u16 },
    /// The player left the game.
    LeaveGame,
    /// Any other command, kept by its type name.
    Other(String),
}

impl CommandKind {
    /// Unit type created by this command, if it creates one.
    pub fn unit_id(&self) -> Option<u16> {
        match self {
            CommandKind::Build { unit_id }
            | CommandKind::Train { unit_id }
            | CommandKind::BuildingMorph { unit_id } => Some(*unit_id),
            CommandKind::LeaveGame | CommandKind::Other(_) => None,
        }
    }

    /// Command type name as written by screp.
    pub fn type_name(&self) -> &str {
        match self {
            CommandKind::Build { .. } => "Build",
            CommandKind::Train { .. } => "Train",
            CommandKind::BuildingMorph { .. } => "Building Morph",
            CommandKind::LeaveGame => "Leave Game",
            CommandKind::Other(name) => name,
        }
    }
}

/// A single player command, in event order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCommand", into = "RawCommand")]
pub struct Command {
    pub frame: Frame,
    pub player_id: u8,
    pub kind: CommandKind,
}

impl Command {
    pub fn new(frame: u32, player_id: u8, kind: CommandKind) -> Self {
        Self {
            frame: Frame(frame),
            player_id,
            kind,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawNamed {
    #[serde(rename = "Name")]
    name: String,
}

#[derive(Serialize, Deserialize)]
struct RawUnit {
    #[serde(rename = "ID")]
    id: u16,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawCommand {
    #[serde(default)]
    frame: Frame,
    #[serde(rename = "PlayerID", default)]
    player_id: u8,
    #[serde(rename = "Type")]
    kind: RawNamed,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<RawUnit>,
}

impl From<RawCommand> for Command {
    fn from(raw: RawCommand) -> Self {
        let unit_id = raw.unit.map(|u| u.id);
        let kind = match (raw.kind.name.as_str(), unit_id) {
            ("Build", Some(unit_id)) => CommandKind::Build { unit_id },
            // screp decodes larva morphs with the same payload as trains
            ("Train" | "Unit Morph", Some(unit_id)) => CommandKind::Train { unit_id },
            ("Building Morph", Some(unit_id)) => CommandKind::BuildingMorph { unit_id },
            ("Leave Game", _) => CommandKind::LeaveGame,
            _ => CommandKind::Other(raw.kind.name),
        };
        Command {
            frame: raw.frame,
            player_id: raw.player_id,
            kind,
        }
    }
}

impl From<Command> for RawCommand {
    fn from(cmd: Command) -> Self {
        let unit = cmd.kind.unit_id().map(|id| RawUnit { id });
        RawCommand {
            frame: cmd.frame,
            player_id: cmd.player_id,
            kind: RawNamed {
                name: cmd.kind.type_name().to_string(),
            },
            unit,
        }
    }
}

/// Per-player derived statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDesc {
    #[serde(rename = "PlayerID")]
    pub player_id: u8,
    #[serde(rename = "APM", default)]
    pub apm: u32,
}

/// Statistics derived from the command stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Computed {
    /// Winning team, 0 when it cannot be determined.
    #[serde(default)]
    pub winner_team: u8,
    #[serde(default)]
    pub player_descs: Vec<PlayerDesc>,
}

impl Computed {
    pub fn player_desc(&self, player_id: u8) -> Option<&PlayerDesc> {
        self.player_descs.iter().find(|d| d.player_id == player_id)
    }
}

/// A decoded replay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Replay {
    pub header: Header,
    #[serde(default, with = "commands_section")]
    pub commands: Vec<Command>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed: Option<Computed>,
}

/// screp nests commands as `"Commands": {"Cmds": [...]}` and writes `null`
/// when commands were not parsed.
mod commands_section {
    use super::Command;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Section<T> {
        #[serde(rename = "Cmds", default)]
        cmds: T,
    }

    pub fn serialize<S: Serializer>(cmds: &[Command], serializer: S) -> Result<S::Ok, S::Error> {
        Section { cmds }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Command>, D::Error> {
        let section: Option<Section<Vec<Command>>> = Option::deserialize(deserializer)?;
        Ok(section.map(|s| s.cmds).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u8, name: &str, race: Race, team: u8) -> Player {
        Player {
            id,
            name: name.to_string(),
            race,
            team,
            observer: false,
        }
    }

    #[test]
    fn test_frame_seconds_truncates() {
        // 1000 frames * 42ms = 42s
        assert_eq!(Frame(1000).seconds(), 42);
        // 30 frames * 42ms = 1.26s
        assert_eq!(Frame(30).seconds(), 1);
        assert_eq!(Frame(0).seconds(), 0);
    }

    #[test]
    fn test_matchup_groups_by_team() {
        let header = Header {
            players: vec![
                player(0, "a", Race::Zerg, 1),
                player(1, "b", Race::Terran, 2),
                player(2, "c", Race::Protoss, 1),
                player(3, "d", Race::Terran, 2),
            ],
            ..Default::default()
        };
        assert_eq!(header.matchup(), "ZPvTT");
    }

    #[test]
    fn test_matchup_skips_observers() {
        let mut obs = player(2, "obs", Race::Protoss, 3);
        obs.observer = true;
        let header = Header {
            players: vec![
                player(0, "a", Race::Zerg, 1),
                player(1, "b", Race::Terran, 2),
                obs,
            ],
            ..Default::default()
        };
        assert_eq!(header.matchup(), "ZvT");
    }

    #[test]
    fn test_parse_screp_dump() {
        let json = r#"{
            "Header": {
                "Engine": {"Name": "Brood War"},
                "Frames": 14286,
                "StartTime": "2020-05-17T20:12:03Z",
                "Title": "test",
                "Map": "Fighting Spirit",
                "Players": [
                    {"ID": 0, "Name": "adultrabbit", "Race": {"Name": "Zerg", "Letter": 90}, "Team": 1, "Observer": false},
                    {"ID": 1, "Name": "opponent", "Race": {"Name": "Protoss"}, "Team": 2}
                ]
            },
            "Commands": {"Cmds": [
                {"Frame": 10, "PlayerID": 0, "Type": {"ID": 12, "Name": "Build"}, "Unit": {"ID": 142, "Name": "Spawning Pool"}},
                {"Frame": 11, "PlayerID": 1, "Type": {"Name": "Unit Morph"}, "Unit": {"ID": 37}},
                {"Frame": 12, "PlayerID": 1, "Type": {"Name": "Right Click"}},
                {"Frame": 13, "PlayerID": 1, "Type": {"Name": "Leave Game"}}
            ]},
            "Computed": {"WinnerTeam": 1, "PlayerDescs": [{"PlayerID": 0, "APM": 250}]}
        }"#;

        let replay: Replay = serde_json::from_str(json).unwrap();
        assert_eq!(replay.header.map, "Fighting Spirit");
        assert_eq!(replay.header.players[0].race, Race::Zerg);
        assert_eq!(replay.header.players[1].team, 2);
        assert_eq!(
            replay.commands[0].kind,
            CommandKind::Build { unit_id: 142 }
        );
        assert_eq!(replay.commands[1].kind, CommandKind::Train { unit_id: 37 });
        assert_eq!(
            replay.commands[2].kind,
            CommandKind::Other("Right Click".to_string())
        );
        assert_eq!(replay.commands[3].kind, CommandKind::LeaveGame);
        let computed = replay.computed.unwrap();
        assert_eq!(computed.winner_team, 1);
        assert_eq!(computed.player_desc(0).unwrap().apm, 250);
    }

    #[test]
    fn test_null_commands_section() {
        let json = r#"{"Header": {"Map": "x", "Players": []}, "Commands": null}"#;
        let replay: Replay = serde_json::from_str(json).unwrap();
        assert!(replay.commands.is_empty());
        assert!(replay.computed.is_none());
    }
}
