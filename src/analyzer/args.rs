//! Argument validation and normalization shared by the builtin analyzers.

use lazy_static::lazy_static;
use phf::phf_map;
use regex::Regex;

use super::units;
use super::AnalyzerError;
use crate::replay::Race;

/// Lower-cased race aliases accepted on the command line.
static RACE_ALIASES: phf::Map<&'static str, Race> = phf_map! {
    "zerg" => Race::Zerg,
    "z" => Race::Zerg,
    "protoss" => Race::Protoss,
    "p" => Race::Protoss,
    "toss" => Race::Protoss,
    "terran" => Race::Terran,
    "t" => Race::Terran,
    "ran" => Race::Terran,
};

lazy_static! {
    /// A 1v1 matchup such as `ZvT`, any case.
    static ref MATCHUP_PATTERN: Regex = Regex::new(r"^[ZzTtPp][vV][ZzTtPp]$").unwrap();
}

fn first<'a>(args: &'a [String], what: &'static str) -> Result<&'a str, AnalyzerError> {
    args.first()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .ok_or(AnalyzerError::MissingArgument(what))
}

/// Parse a race name or alias, e.g. `toss` -> `Protoss`.
pub fn race(args: &[String]) -> Result<Race, AnalyzerError> {
    let raw = first(args, "a race name e.g. Zerg/Protoss/Terran")?;
    RACE_ALIASES
        .get(raw.to_lowercase().as_str())
        .copied()
        .ok_or_else(|| AnalyzerError::invalid(raw, "expected one of Zerg/Protoss/Terran"))
}

/// Parse a whole number of minutes.
pub fn minutes(args: &[String]) -> Result<i64, AnalyzerError> {
    let raw = first(args, "a number of minutes")?;
    raw.parse()
        .map_err(|_| AnalyzerError::invalid(raw, "expected a whole number of minutes"))
}

/// Parse a 1v1 matchup into its two upper-case race letters, in the order
/// they were written.
pub fn matchup(args: &[String]) -> Result<[char; 2], AnalyzerError> {
    let raw = first(args, "a 1v1 matchup e.g. TvZ")?;
    if !MATCHUP_PATTERN.is_match(raw) {
        return Err(AnalyzerError::invalid(raw, "expected a 1v1 matchup e.g. TvZ"));
    }
    let upper: Vec<char> = raw.to_uppercase().chars().collect();
    Ok([upper[0], upper[2]])
}

/// Parse an exact unit, building or evolution name into its unit type id.
pub fn unit(args: &[String]) -> Result<u16, AnalyzerError> {
    let raw = first(args, "a unit/building/evolution name e.g. Zergling")?;
    units::unit_id(raw).ok_or_else(|| {
        AnalyzerError::invalid(raw, "unknown unit/building/evolution name (see `raszagal list --units`)")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_race_aliases() {
        assert_eq!(race(&args(&["Zerg"])).unwrap(), Race::Zerg);
        assert_eq!(race(&args(&["z"])).unwrap(), Race::Zerg);
        assert_eq!(race(&args(&["TOSS"])).unwrap(), Race::Protoss);
        assert_eq!(race(&args(&["ran"])).unwrap(), Race::Terran);
        assert!(matches!(
            race(&args(&["random"])),
            Err(AnalyzerError::InvalidArgument { .. })
        ));
        assert!(matches!(
            race(&args(&[])),
            Err(AnalyzerError::MissingArgument(_))
        ));
    }

    #[test]
    fn test_minutes() {
        assert_eq!(minutes(&args(&["15"])).unwrap(), 15);
        assert!(minutes(&args(&["fifteen"])).is_err());
        assert!(minutes(&args(&[""])).is_err());
    }

    #[test]
    fn test_matchup() {
        assert_eq!(matchup(&args(&["zvt"])).unwrap(), ['Z', 'T']);
        assert_eq!(matchup(&args(&["PvZ"])).unwrap(), ['P', 'Z']);
        assert!(matchup(&args(&["ZxT"])).is_err());
        assert!(matchup(&args(&["ZvR"])).is_err());
        assert!(matchup(&args(&["ZZvT"])).is_err());
    }

    #[test]
    fn test_unit() {
        assert_eq!(unit(&args(&["Spawning Pool"])).unwrap(), 0x8E);
        assert!(unit(&args(&["Pool"])).is_err());
    }
}
