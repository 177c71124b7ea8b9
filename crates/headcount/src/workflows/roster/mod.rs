mod mapping;
pub(crate) mod parser;
mod normalizer;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::workflows::scenario::domain::RosterSnapshot;

pub use normalizer::SchemaError;
pub use parser::RawTable;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Schema(SchemaError),
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::Schema(err) => {
                write!(f, "could not map roster columns onto the expected schema: {}", err)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::Schema(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<SchemaError> for RosterImportError {
    fn from(err: SchemaError) -> Self {
        Self::Schema(err)
    }
}

/// Entry point turning a raw roster export into the filtered, typed working
/// set that the scenario engine consumes.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<RosterSnapshot, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<RosterSnapshot, RosterImportError> {
        Self::from_reader_with_overrides(reader, &HashMap::new())
    }

    /// Imports with caller-supplied column overrides, for exports whose
    /// columns the synonym table mis-detects. Keys are canonical names,
    /// values the source column to take instead.
    pub fn from_reader_with_overrides<R: Read>(
        reader: R,
        overrides: &HashMap<String, String>,
    ) -> Result<RosterSnapshot, RosterImportError> {
        let table = RawTable::from_reader(reader)?;
        Ok(Self::from_table(&table, overrides)?)
    }

    /// Normalizes an already-loaded table. The caller's table is left as-is.
    pub fn from_table(
        table: &RawTable,
        overrides: &HashMap<String, String>,
    ) -> Result<RosterSnapshot, SchemaError> {
        let canonical = normalizer::canonicalize(table, overrides)?;
        Ok(normalizer::build_snapshot(&canonical))
    }
}
