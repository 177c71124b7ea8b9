use chrono::{DateTime, NaiveDate};
use std::collections::HashMap;
use std::io::Read;

/// Strips BOM/zero-width characters, collapses whitespace, and lowercases so
/// exports from different HR tools agree on column names.
pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

/// Column-major roster table as handed over by an external loader: an ordered
/// list of normalized header names plus the raw string values per column.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    headers: Vec<String>,
    columns: HashMap<String, Vec<String>>,
    row_count: usize,
}

impl RawTable {
    /// Reads a CSV export. Ragged rows are padded with empty strings; when a
    /// header name repeats, the first occurrence wins.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut headers: Vec<String> = Vec::new();
        let mut positions: Vec<usize> = Vec::new();
        for (idx, raw) in csv_reader.headers()?.iter().enumerate() {
            let name = normalize_header(raw);
            if name.is_empty() || headers.contains(&name) {
                continue;
            }
            headers.push(name);
            positions.push(idx);
        }

        let mut columns: HashMap<String, Vec<String>> = headers
            .iter()
            .map(|name| (name.clone(), Vec::new()))
            .collect();
        let mut row_count = 0;

        for record in csv_reader.records() {
            let record = record?;
            for (name, idx) in headers.iter().zip(positions.iter()) {
                let value = record.get(*idx).unwrap_or("").to_string();
                if let Some(column) = columns.get_mut(name) {
                    column.push(value);
                }
            }
            row_count += 1;
        }

        Ok(Self {
            headers,
            columns,
            row_count,
        })
    }

    /// Builds a table from pre-split columns, for callers that do not go
    /// through CSV. Columns shorter than the longest one are padded.
    pub fn from_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<String>)>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for (name, values) in columns {
            let name = normalize_header(name.as_ref());
            if name.is_empty() || table.columns.contains_key(&name) {
                continue;
            }
            table.row_count = table.row_count.max(values.len());
            table.headers.push(name.clone());
            table.columns.insert(name, values);
        }
        for column in table.columns.values_mut() {
            column.resize(table.row_count, String::new());
        }
        table
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub(crate) fn value(&self, name: &str, row: usize) -> &str {
        self.columns
            .get(name)
            .and_then(|column| column.get(row))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Moves a column under a new name. No-op when the source is missing or
    /// the target already exists.
    pub(crate) fn rename_column(&mut self, from: &str, to: &str) {
        if !self.columns.contains_key(from) || self.columns.contains_key(to) {
            return;
        }
        if let Some(values) = self.columns.remove(from) {
            self.columns.insert(to.to_string(), values);
            for header in &mut self.headers {
                if header == from {
                    *header = to.to_string();
                }
            }
        }
    }

    /// Copies an existing column over a target name, replacing any values
    /// already there.
    pub(crate) fn copy_column(&mut self, from: &str, to: &str) {
        let Some(values) = self.columns.get(from).cloned() else {
            return;
        };
        if !self.columns.contains_key(to) {
            self.headers.push(to.to_string());
        }
        self.columns.insert(to.to_string(), values);
    }
}

/// Lenient numeric parse used for compensation and equity cells; empty or
/// non-numeric values count as missing.
pub(crate) fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    None
}
