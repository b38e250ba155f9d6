//! Header-only analyzers: players, races, map, date and duration.

use std::collections::BTreeMap;
use std::path::Path;

use super::{bind_minutes, bind_none, bind_race, bool_result, MetadataSpec, Param};
use crate::analyzer::{AnalyzerContext, AnalyzerError};
use crate::replay::Replay;

pub(super) static SPECS: &[MetadataSpec] = &[
    MetadataSpec {
        name: "is-there-a-race",
        description: "Analyzes if there is a specific race in the replay.",
        string_flag: true,
        boolean_result: true,
        bind: bind_race,
        evaluate: is_there_a_race,
    },
    MetadataSpec {
        name: "my-apm",
        description: "Analyzes the APM of the -me player. -1 if it cannot be computed.",
        string_flag: false,
        boolean_result: false,
        bind: bind_none,
        evaluate: my_apm,
    },
    MetadataSpec {
        name: "my-race",
        description: "Analyzes the race of the -me player.",
        string_flag: false,
        boolean_result: false,
        bind: bind_none,
        evaluate: my_race,
    },
    MetadataSpec {
        name: "my-race-is",
        description: "Analyzes if the race of the -me player is the one specified.",
        string_flag: true,
        boolean_result: true,
        bind: bind_race,
        evaluate: my_race_is,
    },
    MetadataSpec {
        name: "date",
        description: "Analyzes the date of the replay, as yyyy-mm-dd so that it sorts lexicographically.",
        string_flag: false,
        boolean_result: false,
        bind: bind_none,
        evaluate: date,
    },
    MetadataSpec {
        name: "my-name",
        description: "Analyzes the name of the -me player.",
        string_flag: false,
        boolean_result: false,
        bind: bind_none,
        evaluate: my_name,
    },
    MetadataSpec {
        name: "replay-name",
        description: "Analyzes the replay's file name, without extension.",
        string_flag: false,
        boolean_result: false,
        bind: bind_none,
        evaluate: replay_name,
    },
    MetadataSpec {
        name: "replay-path",
        description: "Analyzes the replay's path, as given.",
        string_flag: false,
        boolean_result: false,
        bind: bind_none,
        evaluate: replay_path,
    },
    MetadataSpec {
        name: "my-win",
        description: "Analyzes if the -me player won the game: true, false or unknown.",
        string_flag: false,
        boolean_result: false,
        bind: bind_none,
        evaluate: my_win,
    },
    MetadataSpec {
        name: "my-game",
        description: "Analyzes if the -me player played the game.",
        string_flag: false,
        boolean_result: true,
        bind: bind_none,
        evaluate: my_game,
    },
    MetadataSpec {
        name: "map-name",
        description: "Analyzes the map's name. Versions of the same map may have slightly different names.",
        string_flag: false,
        boolean_result: false,
        bind: bind_none,
        evaluate: map_name,
    },
    MetadataSpec {
        name: "is-1v1",
        description: "Analyzes if the replay is of a 1v1 match.",
        string_flag: false,
        boolean_result: true,
        bind: bind_none,
        evaluate: is_1v1,
    },
    MetadataSpec {
        name: "is-2v2",
        description: "Analyzes if the replay is of a 2v2 match.",
        string_flag: false,
        boolean_result: true,
        bind: bind_none,
        evaluate: is_2v2,
    },
    MetadataSpec {
        name: "duration-minutes",
        description: "Analyzes the duration of the replay in whole minutes.",
        string_flag: false,
        boolean_result: false,
        bind: bind_none,
        evaluate: duration_minutes,
    },
    MetadataSpec {
        name: "duration-minutes-is-greater-than",
        description: "Analyzes if the duration of the replay in minutes is greater than specified.",
        string_flag: true,
        boolean_result: true,
        bind: bind_minutes,
        evaluate: duration_is_greater_than,
    },
    MetadataSpec {
        name: "duration-minutes-is-lower-than",
        description: "Analyzes if the duration of the replay in minutes is lower than specified.",
        string_flag: true,
        boolean_result: true,
        bind: bind_minutes,
        evaluate: duration_is_lower_than,
    },
];

type Outcome = Result<String, AnalyzerError>;

fn is_there_a_race(param: Param, replay: &Replay, _: &AnalyzerContext, _: &Path) -> Outcome {
    let found = match param {
        Param::Race(race) => replay.header.active_players().any(|p| p.race == race),
        _ => false,
    };
    Ok(bool_result(found))
}

fn my_apm(_: Param, replay: &Replay, ctx: &AnalyzerContext, _: &Path) -> Outcome {
    let computed = match &replay.computed {
        Some(c) => c,
        None => return Ok("-1".to_string()),
    };
    let me = ctx
        .find_me(&replay.header)
        .ok_or(AnalyzerError::MePlayerNotFound)?;
    if me.observer {
        return Ok("-1".to_string());
    }
    computed
        .player_desc(me.id)
        .map(|d| d.apm.to_string())
        .ok_or_else(|| AnalyzerError::Unexpected(format!("no APM recorded for player {}", me.name)))
}

fn my_race(_: Param, replay: &Replay, ctx: &AnalyzerContext, _: &Path) -> Outcome {
    ctx.find_me(&replay.header)
        .map(|p| p.race.name().to_string())
        .ok_or(AnalyzerError::MePlayerNotFound)
}

fn my_race_is(param: Param, replay: &Replay, ctx: &AnalyzerContext, _: &Path) -> Outcome {
    let me = ctx
        .find_me(&replay.header)
        .ok_or(AnalyzerError::MePlayerNotFound)?;
    Ok(bool_result(param == Param::Race(me.race)))
}

fn date(_: Param, replay: &Replay, _: &AnalyzerContext, _: &Path) -> Outcome {
    Ok(replay
        .header
        .start_time
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default())
}

fn my_name(_: Param, replay: &Replay, ctx: &AnalyzerContext, _: &Path) -> Outcome {
    ctx.find_me(&replay.header)
        .map(|p| p.name.clone())
        .ok_or(AnalyzerError::MePlayerNotFound)
}

fn replay_name(_: Param, _: &Replay, _: &AnalyzerContext, path: &Path) -> Outcome {
    Ok(path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default())
}

fn replay_path(_: Param, _: &Replay, _: &AnalyzerContext, path: &Path) -> Outcome {
    Ok(path.display().to_string())
}

fn my_win(_: Param, replay: &Replay, ctx: &AnalyzerContext, _: &Path) -> Outcome {
    let winner_team = match &replay.computed {
        Some(c) if c.winner_team != 0 => c.winner_team,
        _ => return Ok("unknown".to_string()),
    };
    let me = ctx
        .find_me(&replay.header)
        .ok_or(AnalyzerError::MePlayerNotFound)?;
    Ok(bool_result(me.team == winner_team))
}

fn my_game(_: Param, replay: &Replay, ctx: &AnalyzerContext, _: &Path) -> Outcome {
    Ok(bool_result(ctx.find_me(&replay.header).is_some()))
}

fn map_name(_: Param, replay: &Replay, _: &AnalyzerContext, _: &Path) -> Outcome {
    Ok(replay.header.map.clone())
}

fn team_sizes(replay: &Replay) -> Vec<usize> {
    let mut teams: BTreeMap<u8, usize> = BTreeMap::new();
    for p in replay.header.active_players() {
        *teams.entry(p.team).or_default() += 1;
    }
    teams.into_values().collect()
}

fn is_1v1(_: Param, replay: &Replay, _: &AnalyzerContext, _: &Path) -> Outcome {
    Ok(bool_result(team_sizes(replay) == [1, 1]))
}

fn is_2v2(_: Param, replay: &Replay, _: &AnalyzerContext, _: &Path) -> Outcome {
    Ok(bool_result(team_sizes(replay) == [2, 2]))
}

fn minutes(replay: &Replay) -> i64 {
    (replay.header.duration().as_secs() / 60) as i64
}

fn duration_minutes(_: Param, replay: &Replay, _: &AnalyzerContext, _: &Path) -> Outcome {
    Ok(minutes(replay).to_string())
}

fn duration_is_greater_than(param: Param, replay: &Replay, _: &AnalyzerContext, _: &Path) -> Outcome {
    match param {
        Param::Minutes(limit) => Ok(bool_result(minutes(replay) > limit)),
        _ => Err(AnalyzerError::MissingArgument("a number of minutes")),
    }
}

fn duration_is_lower_than(param: Param, replay: &Replay, _: &AnalyzerContext, _: &Path) -> Outcome {
    match param {
        Param::Minutes(limit) => Ok(bool_result(minutes(replay) < limit)),
        _ => Err(AnalyzerError::MissingArgument("a number of minutes")),
    }
}
