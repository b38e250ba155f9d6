//! Derived statistics computed from the command stream.

use std::collections::{BTreeSet, HashMap, HashSet};

use super::{CommandKind, Computed, PlayerDesc, Replay};

impl Replay {
    /// Fill in `computed` from the command stream.
    ///
    /// Does nothing when the decoder already supplied derived stats.
    pub fn compute(&mut self) {
        if self.computed.is_some() {
            return;
        }
        self.computed = Some(compute_derived_stats(self));
    }
}

/// Derive per-player APM and the winning team.
pub fn compute_derived_stats(replay: &Replay) -> Computed {
    let game_seconds = replay.header.frames.seconds();

    let mut cmd_counts: HashMap<u8, u64> = HashMap::new();
    let mut leavers: HashSet<u8> = HashSet::new();
    for cmd in &replay.commands {
        *cmd_counts.entry(cmd.player_id).or_default() += 1;
        if cmd.kind == CommandKind::LeaveGame {
            leavers.insert(cmd.player_id);
        }
    }

    let player_descs = replay
        .header
        .active_players()
        .map(|p| {
            let count = cmd_counts.get(&p.id).copied().unwrap_or(0);
            let apm = if game_seconds == 0 {
                0
            } else {
                (count * 60 / game_seconds) as u32
            };
            PlayerDesc {
                player_id: p.id,
                apm,
            }
        })
        .collect();

    Computed {
        winner_team: winner_team(replay, &leavers),
        player_descs,
    }
}

/// The winner is the only team with a player who never left. Without any
/// leave command there is no evidence either way.
fn winner_team(replay: &Replay, leavers: &HashSet<u8>) -> u8 {
    if leavers.is_empty() {
        return 0;
    }
    let remaining: BTreeSet<u8> = replay
        .header
        .active_players()
        .filter(|p| !leavers.contains(&p.id))
        .map(|p| p.team)
        .collect();
    if remaining.len() == 1 {
        remaining.into_iter().next().unwrap_or(0)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::{Command, Frame, Header, Player, Race};

    fn two_player_replay(commands: Vec<Command>) -> Replay {
        Replay {
            header: Header {
                // 60 seconds of game time
                frames: Frame(60_000 / 42 + 1),
                players: vec![
                    Player {
                        id: 0,
                        name: "a".to_string(),
                        race: Race::Zerg,
                        team: 1,
                        observer: false,
                    },
                    Player {
                        id: 1,
                        name: "b".to_string(),
                        race: Race::Terran,
                        team: 2,
                        observer: false,
                    },
                ],
                ..Default::default()
            },
            commands,
            computed: None,
        }
    }

    #[test]
    fn test_apm_per_player() {
        let mut cmds = Vec::new();
        for i in 0..120 {
            cmds.push(Command::new(i, 0, CommandKind::Other("Select".to_string())));
        }
        for i in 0..30 {
            cmds.push(Command::new(i, 1, CommandKind::Other("Select".to_string())));
        }
        let mut replay = two_player_replay(cmds);
        replay.compute();

        let computed = replay.computed.unwrap();
        assert_eq!(computed.player_desc(0).unwrap().apm, 120);
        assert_eq!(computed.player_desc(1).unwrap().apm, 30);
    }

    #[test]
    fn test_winner_from_leave_game() {
        let mut replay = two_player_replay(vec![Command::new(500, 1, CommandKind::LeaveGame)]);
        replay.compute();
        assert_eq!(replay.computed.unwrap().winner_team, 1);
    }

    #[test]
    fn test_no_winner_without_leavers() {
        let mut replay = two_player_replay(vec![]);
        replay.compute();
        assert_eq!(replay.computed.unwrap().winner_team, 0);
    }

    #[test]
    fn test_compute_keeps_decoder_stats() {
        let mut replay = two_player_replay(vec![Command::new(500, 1, CommandKind::LeaveGame)]);
        replay.computed = Some(Computed {
            winner_team: 2,
            player_descs: vec![],
        });
        replay.compute();
        assert_eq!(replay.computed.unwrap().winner_team, 2);
    }

    #[test]
    fn test_zero_length_game() {
        let mut replay = two_player_replay(vec![Command::new(0, 0, CommandKind::LeaveGame)]);
        replay.header.frames = Frame(0);
        replay.compute();
        let computed = replay.computed.unwrap();
        assert_eq!(computed.player_desc(0).unwrap().apm, 0);
        assert_eq!(computed.winner_team, 2);
    }
}
