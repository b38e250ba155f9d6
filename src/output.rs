//! Output sinks for analyzer results.
//!
//! The executor calls [`Output::pre`] once with the ordered wrappers, then
//! [`Output::replay_results`] once per accepted replay with the full row
//! (filters included), then [`Output::post`]. Sinks drop filter columns
//! themselves.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use thiserror::Error;

use crate::engine::AnalyzerWrapper;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A sequential sink for result rows.
pub trait Output {
    fn pre(&mut self, wrappers: &[AnalyzerWrapper]) -> Result<(), OutputError>;
    fn replay_results(&mut self, row: &[String]) -> Result<(), OutputError>;
    fn post(&mut self) -> Result<(), OutputError>;
}

/// Swallows everything. Used when results are consumed in memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOutput;

impl Output for NoOutput {
    fn pre(&mut self, _wrappers: &[AnalyzerWrapper]) -> Result<(), OutputError> {
        Ok(())
    }

    fn replay_results(&mut self, _row: &[String]) -> Result<(), OutputError> {
        Ok(())
    }

    fn post(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

/// Which positions of a full row are output columns.
fn column_mask(wrappers: &[AnalyzerWrapper]) -> Vec<bool> {
    wrappers.iter().map(|w| !w.is_filter()).collect()
}

fn columns<'a, T: 'a>(mask: &'a [bool], row: &'a [T]) -> impl Iterator<Item = &'a T> + 'a {
    row.iter()
        .zip(mask.iter())
        .filter(|(_, keep)| **keep)
        .map(|(value, _)| value)
}

/// CSV with a header row of column display names.
///
/// Writes nothing at all when there are no output columns.
pub struct CsvOutput<W: Write> {
    writer: csv::Writer<W>,
    mask: Vec<bool>,
    enabled: bool,
}

impl<W: Write> CsvOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(writer),
            mask: Vec::new(),
            enabled: false,
        }
    }
}

impl<W: Write> Output for CsvOutput<W> {
    fn pre(&mut self, wrappers: &[AnalyzerWrapper]) -> Result<(), OutputError> {
        self.mask = column_mask(wrappers);
        let header: Vec<&str> = wrappers
            .iter()
            .filter(|w| !w.is_filter())
            .map(|w| w.display_name.as_str())
            .collect();
        self.enabled = !header.is_empty();
        if self.enabled {
            self.writer.write_record(&header)?;
        }
        Ok(())
    }

    fn replay_results(&mut self, row: &[String]) -> Result<(), OutputError> {
        if self.enabled {
            self.writer.write_record(columns(&self.mask, row))?;
        }
        Ok(())
    }

    fn post(&mut self) -> Result<(), OutputError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// One JSON object, keys in column order.
struct JsonRow<'a> {
    names: &'a [String],
    values: Vec<&'a String>,
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.names.iter().zip(&self.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A JSON array of objects, streamed one row at a time.
pub struct JsonOutput<W: Write> {
    writer: W,
    mask: Vec<bool>,
    names: Vec<String>,
    first_row: bool,
}

impl<W: Write> JsonOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            mask: Vec::new(),
            names: Vec::new(),
            first_row: true,
        }
    }
}

impl<W: Write> Output for JsonOutput<W> {
    fn pre(&mut self, wrappers: &[AnalyzerWrapper]) -> Result<(), OutputError> {
        self.mask = column_mask(wrappers);
        self.names = wrappers
            .iter()
            .filter(|w| !w.is_filter())
            .map(|w| w.display_name.clone())
            .collect();
        self.first_row = true;
        self.writer.write_all(b"[\n")?;
        Ok(())
    }

    fn replay_results(&mut self, row: &[String]) -> Result<(), OutputError> {
        if !self.first_row {
            self.writer.write_all(b",\n")?;
        }
        let json_row = JsonRow {
            names: &self.names,
            values: columns(&self.mask, row).collect(),
        };
        serde_json::to_writer(&mut self.writer, &json_row)?;
        self.first_row = false;
        Ok(())
    }

    fn post(&mut self) -> Result<(), OutputError> {
        self.writer.write_all(b"\n]\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Output format selector used by the CLI and config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    None,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::None => "none",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "none" => Ok(OutputFormat::None),
            other => Err(format!(
                "unknown output format {other:?}, must be csv, json or none"
            )),
        }
    }
}

/// Build the sink for `format` writing to `writer`.
pub fn for_format<'a, W: Write + 'a>(format: OutputFormat, writer: W) -> Box<dyn Output + 'a> {
    match format {
        OutputFormat::Csv => Box::new(CsvOutput::new(writer)),
        OutputFormat::Json => Box::new(JsonOutput::new(writer)),
        OutputFormat::None => Box::new(NoOutput),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Catalog;
    use crate::engine::{build_wrappers, AnalyzerRequest};

    fn wrappers(requests: &[&str]) -> Vec<AnalyzerWrapper> {
        let requests: Vec<AnalyzerRequest> = requests.iter().map(|r| r.parse().unwrap()).collect();
        build_wrappers(&requests, Catalog::builtin()).0
    }

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_csv_drops_filter_columns() {
        // sorted: filter--is-1v1, map-name, my-race
        let ws = wrappers(&["my-race", "filter--is-1v1", "map-name"]);
        let mut buf = Vec::new();
        {
            let mut out = CsvOutput::new(&mut buf);
            out.pre(&ws).unwrap();
            out.replay_results(&row(&["true", "Python", "Zerg"])).unwrap();
            out.replay_results(&row(&["true", "Fighting Spirit, 1.3", "Terran"]))
                .unwrap();
            out.post().unwrap();
        }
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "map-name,my-race\nPython,Zerg\n\"Fighting Spirit, 1.3\",Terran\n"
        );
    }

    #[test]
    fn test_csv_without_columns_writes_nothing() {
        let ws = wrappers(&["filter--is-1v1"]);
        let mut buf = Vec::new();
        {
            let mut out = CsvOutput::new(&mut buf);
            out.pre(&ws).unwrap();
            out.replay_results(&row(&["true"])).unwrap();
            out.post().unwrap();
        }
        assert!(buf.is_empty());
    }

    #[test]
    fn test_json_keeps_column_order() {
        let ws = wrappers(&["my-race", "map-name", "filter-not--is-2v2"]);
        let mut buf = Vec::new();
        {
            let mut out = JsonOutput::new(&mut buf);
            out.pre(&ws).unwrap();
            out.replay_results(&row(&["false", "Python", "Zerg"])).unwrap();
            out.replay_results(&row(&["false", "Circuit \"Breaker\"", "Protoss"]))
                .unwrap();
            out.post().unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "[\n{\"map-name\":\"Python\",\"my-race\":\"Zerg\"},\n{\"map-name\":\"Circuit \\\"Breaker\\\"\",\"my-race\":\"Protoss\"}\n]\n"
        );
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_json_empty_is_valid() {
        let ws = wrappers(&["map-name"]);
        let mut buf = Vec::new();
        {
            let mut out = JsonOutput::new(&mut buf);
            out.pre(&ws).unwrap();
            out.post().unwrap();
        }
        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, serde_json::json!([]));
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("none".parse::<OutputFormat>().unwrap(), OutputFormat::None);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
