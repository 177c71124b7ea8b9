use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::equity::EquityFormat;

/// One roster row after normalization and filtering: ids are unique, the
/// compensation figure parsed, dates resolved, everything else optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub employee_id: String,
    pub name: String,
    pub role: String,
    pub department: String,
    pub location: String,
    pub comp_usd: i64,
    pub reports_to: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub level: Option<String>,
    pub equity_raw: Option<f64>,
}

/// The filtered working set carried through scoring, plus the equity-format
/// metadata detected at import time so the presentation layer can label the
/// equity figure correctly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub people: Vec<Person>,
    pub equity: EquityFormat,
}

impl RosterSnapshot {
    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

/// A person plus the derived features and final weighted score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPerson {
    #[serde(flatten)]
    pub person: Person,
    pub tenure_years: f64,
    pub direct_reports: usize,
    pub level_score: f64,
    pub equity_pct: f64,
    pub impact_score: f64,
}

/// External cap-table input used to convert share grants to ownership
/// percentages. Typically deserialized from a `cap_table.json` maintained by
/// the finance side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapTable {
    pub total_shares_outstanding: f64,
}

impl CapTable {
    /// A cap table only converts shares when the denominator is meaningful.
    pub fn is_usable(&self) -> bool {
        self.total_shares_outstanding > 0.0 && self.total_shares_outstanding.is_finite()
    }
}
