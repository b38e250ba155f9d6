//! Matchup analyzers.
//!
//! A matchup is written with one race letter per player and teams separated
//! by `v`, e.g. `ZvT` or `PPvTZ`.

use std::collections::BTreeMap;
use std::path::Path;

use super::{bind_matchup, bind_none, bool_result, MetadataSpec, Param};
use crate::analyzer::{AnalyzerContext, AnalyzerError};
use crate::replay::{Header, Player, Replay};

pub(super) static SPECS: &[MetadataSpec] = &[
    MetadataSpec {
        name: "matchup",
        description: "Analyzes the replay's matchup. On a 1v1 the races are sorted, so it returns TvZ rather than ZvT.",
        string_flag: false,
        boolean_result: false,
        bind: bind_none,
        evaluate: matchup,
    },
    MetadataSpec {
        name: "my-matchup",
        description: "Analyzes the replay's matchup from the point of view of the -me player, e.g. ZvT for a Zerg -me player.",
        string_flag: false,
        boolean_result: false,
        bind: bind_none,
        evaluate: my_matchup,
    },
    MetadataSpec {
        name: "matchup-is",
        description: "Analyzes if the replay's 1v1 matchup is the specified one, in either order (ZvT == TvZ).",
        string_flag: true,
        boolean_result: true,
        bind: bind_matchup,
        evaluate: matchup_is,
    },
    MetadataSpec {
        name: "my-matchup-is",
        description: "Analyzes if the replay's 1v1 matchup is the specified one, with the -me player's race first.",
        string_flag: true,
        boolean_result: true,
        bind: bind_matchup,
        evaluate: my_matchup_is,
    },
];

type Outcome = Result<String, AnalyzerError>;

/// The two players of a 1v1, in header order.
fn duel(header: &Header) -> Option<(&Player, &Player)> {
    let players: Vec<&Player> = header.active_players().collect();
    match players.as_slice() {
        [a, b] => Some((*a, *b)),
        _ => None,
    }
}

fn sorted_pair(a: char, b: char) -> [char; 2] {
    if a <= b {
        [a, b]
    } else {
        [b, a]
    }
}

/// Team-grouped matchup with the given team first.
fn matchup_from_team(header: &Header, first_team: u8) -> String {
    let mut teams: BTreeMap<(bool, u8), String> = BTreeMap::new();
    for p in header.active_players() {
        teams
            .entry((p.team != first_team, p.team))
            .or_default()
            .push(p.race.letter());
    }
    teams.into_values().collect::<Vec<_>>().join("v")
}

fn matchup(_: Param, replay: &Replay, _: &AnalyzerContext, _: &Path) -> Outcome {
    Ok(match duel(&replay.header) {
        Some((a, b)) => {
            let [x, y] = sorted_pair(a.race.letter(), b.race.letter());
            format!("{x}v{y}")
        }
        None => replay.header.matchup(),
    })
}

fn my_matchup(_: Param, replay: &Replay, ctx: &AnalyzerContext, _: &Path) -> Outcome {
    // observers have no side in the matchup
    let me = match ctx.find_me(&replay.header) {
        Some(me) if !me.observer => me,
        _ => return Ok(String::new()),
    };
    Ok(match duel(&replay.header) {
        Some((a, b)) => {
            let (mine, theirs) = if a.id == me.id { (a, b) } else { (b, a) };
            format!("{}v{}", mine.race.letter(), theirs.race.letter())
        }
        None => matchup_from_team(&replay.header, me.team),
    })
}

fn matchup_is(param: Param, replay: &Replay, _: &AnalyzerContext, _: &Path) -> Outcome {
    let expected = match param {
        Param::Matchup([a, b]) => sorted_pair(a, b),
        _ => return Err(AnalyzerError::MissingArgument("a 1v1 matchup e.g. TvZ")),
    };
    Ok(match duel(&replay.header) {
        Some((a, b)) => bool_result(sorted_pair(a.race.letter(), b.race.letter()) == expected),
        None => String::new(),
    })
}

fn my_matchup_is(param: Param, replay: &Replay, ctx: &AnalyzerContext, _: &Path) -> Outcome {
    let expected = match param {
        Param::Matchup(pair) => pair,
        _ => return Err(AnalyzerError::MissingArgument("a 1v1 matchup e.g. ZvT")),
    };
    let (me, (a, b)) = match (ctx.find_me(&replay.header), duel(&replay.header)) {
        (Some(me), Some(pair)) if !me.observer => (me, pair),
        _ => return Ok(String::new()),
    };
    let (mine, theirs) = if a.id == me.id { (a, b) } else { (b, a) };
    Ok(bool_result([mine.race.letter(), theirs.race.letter()] == expected))
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use crate::replay::Race;

    fn pvz() -> crate::replay::Replay {
        replay(vec![
            player(0, "opponent", Race::Protoss, 1),
            player(1, "adultrabbit", Race::Zerg, 2),
        ])
    }

    #[test]
    fn test_matchup_sorted_on_1v1() {
        let r = pvz();
        assert_eq!(run(by_name("matchup").as_mut(), &[], &r, "").unwrap(), "PvZ");

        let tvz = replay(vec![
            player(0, "a", Race::Zerg, 1),
            player(1, "b", Race::Terran, 2),
        ]);
        assert_eq!(run(by_name("matchup").as_mut(), &[], &tvz, "").unwrap(), "TvZ");
    }

    #[test]
    fn test_matchup_team_games() {
        let r = replay(vec![
            player(0, "a", Race::Zerg, 1),
            player(1, "b", Race::Terran, 2),
            player(2, "c", Race::Protoss, 1),
            player(3, "d", Race::Terran, 2),
        ]);
        assert_eq!(run(by_name("matchup").as_mut(), &[], &r, "").unwrap(), "ZPvTT");
        assert_eq!(run(by_name("my-matchup").as_mut(), &[], &r, "d").unwrap(), "TTvZP");
    }

    #[test]
    fn test_my_matchup() {
        let r = pvz();
        assert_eq!(run(by_name("my-matchup").as_mut(), &[], &r, "adultrabbit").unwrap(), "ZvP");
        assert_eq!(run(by_name("my-matchup").as_mut(), &[], &r, "opponent").unwrap(), "PvZ");
        assert_eq!(run(by_name("my-matchup").as_mut(), &[], &r, "ghost").unwrap(), "");
    }

    #[test]
    fn test_matchup_is_either_order() {
        let r = pvz();
        assert_eq!(run(by_name("matchup-is").as_mut(), &["ZvP"], &r, "").unwrap(), "true");
        assert_eq!(run(by_name("matchup-is").as_mut(), &["pvz"], &r, "").unwrap(), "true");
        assert_eq!(run(by_name("matchup-is").as_mut(), &["TvZ"], &r, "").unwrap(), "false");

        let ffa = replay(vec![
            player(0, "a", Race::Zerg, 1),
            player(1, "b", Race::Terran, 2),
            player(2, "c", Race::Protoss, 3),
        ]);
        assert_eq!(run(by_name("matchup-is").as_mut(), &["ZvT"], &ffa, "").unwrap(), "");
    }

    #[test]
    fn test_my_matchup_is_respects_order() {
        let r = pvz();
        let mut a = by_name("my-matchup-is");
        assert_eq!(run(a.as_mut(), &["ZvP"], &r, "adultrabbit").unwrap(), "true");
        assert_eq!(run(a.as_mut(), &["PvZ"], &r, "adultrabbit").unwrap(), "false");
        assert_eq!(run(a.as_mut(), &["PvZ"], &r, "opponent").unwrap(), "true");
        assert_eq!(run(a.as_mut(), &["ZvP"], &r, "ghost").unwrap(), "");
        assert!(a.set_arguments(&["ZvX".to_string()]).is_err());
    }

    #[test]
    fn test_observer_me_has_no_matchup() {
        let mut r = replay(vec![
            player(0, "adultrabbit", Race::Zerg, 1),
            player(1, "opponent", Race::Protoss, 2),
            player(2, "watcher", Race::Terran, 3),
        ]);
        r.header.players[2].observer = true;

        assert_eq!(run(by_name("matchup").as_mut(), &[], &r, "watcher").unwrap(), "PvZ");
        assert_eq!(run(by_name("my-matchup").as_mut(), &[], &r, "watcher").unwrap(), "");
        let mut a = by_name("my-matchup-is");
        assert_eq!(run(a.as_mut(), &["PvZ"], &r, "watcher").unwrap(), "");
        assert_eq!(run(a.as_mut(), &["ZvP"], &r, "watcher").unwrap(), "");
    }
}
