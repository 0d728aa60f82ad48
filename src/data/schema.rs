use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::error::{LoadError, LoadResult};

// ---------------------------------------------------------------------------
// SchemaMapping – external CSV headers → canonical fields
// ---------------------------------------------------------------------------

/// Maps the locale-specific headers of a capture file onto the canonical
/// `timestamp` / `cpu_percent` / `ram_percent` fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchemaMapping {
    pub date_column: String,
    pub time_column: String,
    pub cpu_column: String,
    pub ram_column: String,
    pub delimiter: char,
    /// Tried in order against `"<date> <time>"`.
    pub timestamp_formats: Vec<String>,
}

impl Default for SchemaMapping {
    fn default() -> Self {
        Self {
            date_column: "Data".to_string(),
            time_column: "Hora".to_string(),
            cpu_column: "CPU".to_string(),
            ram_column: "RAM".to_string(),
            delimiter: ';',
            timestamp_formats: vec![
                "%d/%m/%Y %H:%M:%S".to_string(),
                "%d/%m/%Y %H:%M:%S%.f".to_string(),
                "%Y-%m-%d %H:%M:%S".to_string(),
                "%Y-%m-%d %H:%M:%S%.f".to_string(),
                "%d/%m/%Y %H:%M".to_string(),
            ],
        }
    }
}

/// Positions of the mapped columns within one file's header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndices {
    pub date: usize,
    pub time: usize,
    pub cpu: usize,
    pub ram: usize,
}

impl SchemaMapping {
    /// Reject mappings that could never match a file.
    pub fn validate(&self) -> LoadResult<()> {
        let names = [
            &self.date_column,
            &self.time_column,
            &self.cpu_column,
            &self.ram_column,
        ];
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(LoadError::Schema("column names must not be empty".into()));
        }
        let unique: BTreeSet<&str> = names.iter().map(|n| n.trim()).collect();
        if unique.len() != names.len() {
            return Err(LoadError::Schema(
                "each canonical field needs its own column".into(),
            ));
        }
        if self.timestamp_formats.is_empty() {
            return Err(LoadError::Schema("no timestamp formats configured".into()));
        }
        if !self.delimiter.is_ascii() {
            return Err(LoadError::Schema(format!(
                "delimiter '{}' is not a single-byte character",
                self.delimiter
            )));
        }
        Ok(())
    }

    /// Delimiter as the byte the csv reader wants.
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }

    /// Locate every mapped column in `headers`.
    pub fn resolve(&self, headers: &csv::StringRecord, path: &Path) -> LoadResult<ColumnIndices> {
        let names: Vec<&str> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim())
            .collect();

        let find = |column: &str| -> LoadResult<usize> {
            names
                .iter()
                .position(|h| *h == column.trim())
                .ok_or_else(|| LoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                })
        };

        Ok(ColumnIndices {
            date: find(&self.date_column)?,
            time: find(&self.time_column)?,
            cpu: find(&self.cpu_column)?,
            ram: find(&self.ram_column)?,
        })
    }

    /// Join date and time with one space and parse with the first matching format.
    pub fn parse_timestamp(&self, date: &str, time: &str) -> Option<NaiveDateTime> {
        let joined = format!("{} {}", date.trim(), time.trim());
        self.timestamp_formats
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&joined, fmt).ok())
    }
}

/// Parse a percentage written with either `.` or `,` as decimal separator.
pub fn parse_percent(raw: &str) -> Option<f64> {
    let s = raw.trim().trim_end_matches('%').trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>()
        .ok()
        .or_else(|| s.replace(',', ".").parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
