//! Analyzer requests: which analyzer to run, with what arguments, and
//! whether it is a column or a filter.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Role of a requested analyzer in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// A regular output column.
    #[default]
    Column,
    /// Keep only replays where the result is `"true"`.
    Filter,
    /// Drop replays where the result is `"true"`.
    FilterNot,
}

impl FilterMode {
    /// Prefix used on the command line and in request strings.
    pub fn prefix(&self) -> &'static str {
        match self {
            FilterMode::Column => "",
            FilterMode::Filter => "filter--",
            FilterMode::FilterNot => "filter-not--",
        }
    }

    pub fn is_filter(&self) -> bool {
        !matches!(self, FilterMode::Column)
    }

    /// Split a possibly prefixed name into its mode and bare analyzer name.
    pub fn split(name: &str) -> (FilterMode, &str) {
        if let Some(rest) = name.strip_prefix(FilterMode::FilterNot.prefix()) {
            (FilterMode::FilterNot, rest)
        } else if let Some(rest) = name.strip_prefix(FilterMode::Filter.prefix()) {
            (FilterMode::Filter, rest)
        } else {
            (FilterMode::Column, name)
        }
    }

    /// Whether a finished result rejects the replay under this mode.
    pub fn rejects(&self, result: &str) -> bool {
        match self {
            FilterMode::Column => false,
            FilterMode::Filter => result != "true",
            FilterMode::FilterNot => result == "true",
        }
    }
}

/// Errors parsing a request string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("empty analyzer request")]
    Empty,
}

/// One analyzer invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerRequest {
    pub name: String,
    pub args: Vec<String>,
    pub mode: FilterMode,
}

impl AnalyzerRequest {
    pub fn new(name: impl Into<String>, args: Vec<String>, mode: FilterMode) -> Self {
        Self {
            name: name.into(),
            args,
            mode,
        }
    }

    pub fn column(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new(), FilterMode::Column)
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Build from a `[name, args...]` tuple, where `name` may carry a
    /// `filter--` or `filter-not--` prefix. Returns `None` for an empty tuple.
    pub fn from_parts<S: AsRef<str>>(parts: &[S]) -> Option<Self> {
        let (head, rest) = parts.split_first()?;
        let (mode, name) = FilterMode::split(head.as_ref().trim());
        let args = rest.iter().map(|a| a.as_ref().to_string()).collect();
        Some(Self::new(name, args, mode))
    }

    /// Label shown in output headers, e.g. `my-race-is(Zerg)`.
    pub fn display_name(&self) -> String {
        if self.args.is_empty() {
            self.name.clone()
        } else {
            format!("{}({})", self.name, self.args.join(","))
        }
    }
}

/// Parses `name`, `name=arg` or `name=arg1,arg2`, with an optional
/// `filter--`/`filter-not--` prefix on the name.
impl FromStr for AnalyzerRequest {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RequestError::Empty);
        }
        let (head, args) = match s.split_once('=') {
            Some((head, args)) => (
                head,
                args.split(',')
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .map(String::from)
                    .collect(),
            ),
            None => (s, Vec::new()),
        };
        let (mode, name) = FilterMode::split(head.trim());
        if name.is_empty() {
            return Err(RequestError::Empty);
        }
        Ok(Self::new(name, args, mode))
    }
}

impl fmt::Display for AnalyzerRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.mode.prefix(), self.name)?;
        if !self.args.is_empty() {
            write!(f, "={}", self.args.join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_strings() {
        let r: AnalyzerRequest = "my-race".parse().unwrap();
        assert_eq!(r, AnalyzerRequest::column("my-race"));

        let r: AnalyzerRequest = "filter--my-race-is=Zerg".parse().unwrap();
        assert_eq!(r.name, "my-race-is");
        assert_eq!(r.args, vec!["Zerg"]);
        assert_eq!(r.mode, FilterMode::Filter);

        let r: AnalyzerRequest = "filter-not--is-there-a-race = t , p".parse().unwrap();
        assert_eq!(r.name, "is-there-a-race");
        assert_eq!(r.args, vec!["t", "p"]);
        assert_eq!(r.mode, FilterMode::FilterNot);

        assert_eq!("  ".parse::<AnalyzerRequest>(), Err(RequestError::Empty));
        assert_eq!("filter--".parse::<AnalyzerRequest>(), Err(RequestError::Empty));
    }

    #[test]
    fn test_from_parts() {
        let r = AnalyzerRequest::from_parts(&["filter--is-1v1"]).unwrap();
        assert_eq!(r.mode, FilterMode::Filter);
        assert_eq!(r.name, "is-1v1");
        assert!(r.args.is_empty());

        let r = AnalyzerRequest::from_parts(&["my-race-is", "Zerg"]).unwrap();
        assert_eq!(r.args, vec!["Zerg"]);

        let empty: [&str; 0] = [];
        assert!(AnalyzerRequest::from_parts(&empty).is_none());
    }

    #[test]
    fn test_display_name_uses_raw_args() {
        let r = AnalyzerRequest::column("my-race-is").with_args(["z"]);
        assert_eq!(r.display_name(), "my-race-is(z)");
        assert_eq!(AnalyzerRequest::column("matchup").display_name(), "matchup");
    }

    #[test]
    fn test_request_string_display() {
        let r = AnalyzerRequest::column("matchup-is")
            .with_args(["ZvT"])
            .with_mode(FilterMode::FilterNot);
        assert_eq!(r.to_string(), "filter-not--matchup-is=ZvT");
    }

    #[test]
    fn test_rejects() {
        assert!(FilterMode::Filter.rejects("false"));
        assert!(FilterMode::Filter.rejects(""));
        assert!(!FilterMode::Filter.rejects("true"));
        assert!(FilterMode::FilterNot.rejects("true"));
        assert!(!FilterMode::FilterNot.rejects(""));
        assert!(!FilterMode::Column.rejects("false"));
    }
}
