//! Run configuration for raszagal.
//!
//! A config file names the player accounts that count as "me", where to find
//! replays, and which analyzers to run by default.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;

use crate::engine::AnalyzerRequest;
use crate::output::OutputFormat;

/// File names looked up in the working directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["raszagal.yaml", ".raszagal.yaml"];

/// Top-level config definition.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Player names identifying "me", e.g. main account and smurfs.
    #[serde(default)]
    pub me: Vec<String>,
    #[serde(default)]
    pub output: Option<OutputFormat>,
    /// Directory receiving replays that pass every filter.
    #[serde(default)]
    pub copy_to: Option<PathBuf>,
    /// Directories scanned recursively for replays.
    #[serde(default)]
    pub replay_dirs: Vec<PathBuf>,
    /// Glob patterns for paths to skip while scanning replay_dirs (e.g. "**/observer/**")
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Analyzer requests, e.g. "my-race" or "filter--my-race-is=Zerg".
    #[serde(default)]
    pub analyzers: Vec<String>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        // An empty file is a valid, empty config.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Output format, defaulting to CSV.
    pub fn output_format(&self) -> OutputFormat {
        self.output.unwrap_or_default()
    }

    /// Compile `excluded_paths` into a single matcher.
    pub fn excluded_globset(&self) -> anyhow::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            let glob = Glob::new(pattern).map_err(|e| {
                anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e)
            })?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// Parsed analyzer requests, in file order.
    pub fn requests(&self) -> anyhow::Result<Vec<AnalyzerRequest>> {
        self.analyzers
            .iter()
            .map(|s| {
                s.parse::<AnalyzerRequest>()
                    .map_err(|e| anyhow::anyhow!("invalid analyzer entry {:?}: {}", s, e))
            })
            .collect()
    }
}

/// Validate a config for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    config.excluded_globset()?;
    config.requests()?;

    for name in &config.me {
        if name.trim().is_empty() {
            anyhow::bail!("empty player name in 'me'");
        }
    }

    if let Some(dir) = &config.copy_to {
        if dir.as_os_str().is_empty() {
            anyhow::bail!("copy_to must not be empty; remove it to disable copying");
        }
    }

    Ok(())
}

/// The per-user config file, e.g. `~/.config/raszagal/raszagal.yaml`.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "raszagal")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAMES[0]))
}

/// Find the config to use.
///
/// An explicit path wins and must exist. Otherwise the first of
/// [`CONFIG_FILE_NAMES`] present in `dir`, then the per-user config.
pub fn discover(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            anyhow::bail!("config file not found: {}", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }

    for name in CONFIG_FILE_NAMES {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Ok(Some(candidate));
        }
    }

    Ok(user_config_path().filter(|p| p.is_file()))
}

/// Discover, parse and validate. Falls back to defaults when no file exists.
pub fn load(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<(Config, Option<PathBuf>)> {
    match discover(explicit, dir)? {
        Some(path) => {
            let config = Config::parse_file(&path)
                .map_err(|e| anyhow::anyhow!("failed to parse config {}: {}", path.display(), e))?;
            validate(&config)
                .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
            Ok((config, Some(path)))
        }
        None => Ok((Config::default(), None)),
    }
}
