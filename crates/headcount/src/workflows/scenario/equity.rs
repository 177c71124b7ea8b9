//! Detection and conversion of equity-like roster columns.
//!
//! Exports disagree wildly on how equity is reported: some carry a true
//! ownership percentage, some raw share counts, some the monetary grant
//! value. Detection picks one source column and classifies its unit;
//! conversion maps the chosen column onto a common 0-100 scale.

use serde::{Deserialize, Serialize};

use super::domain::{CapTable, Person};
use crate::workflows::roster::parser::{parse_number, RawTable};

const PERCENT_COLUMNS: &[&str] = &[
    "equity_pct",
    "equity_percent",
    "ownership_pct",
    "ownership_percent",
];
const SHARE_COLUMNS: &[&str] = &["equity_shares", "shares", "stock_options", "options"];
const VALUE_COLUMNS: &[&str] = &["rsu_grant_value", "equity_value", "grant_value"];
const GENERIC_COLUMN: &str = "equity";

/// Unit of the detected equity column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquityClass {
    Percentage,
    Shares,
    Value,
    None,
}

impl EquityClass {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Shares => "shares",
            Self::Value => "value",
            Self::None => "none",
        }
    }

    /// How the converted figure should be captioned. A `value` column is a
    /// relative measure, not a true ownership percentage, and must read
    /// differently.
    pub const fn scale_label(self) -> &'static str {
        match self {
            Self::Percentage | Self::Shares => "ownership %",
            Self::Value => "relative grant value (0-100)",
            Self::None => "not included",
        }
    }
}

/// Detection result: the chosen source column and its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityFormat {
    pub class: EquityClass,
    pub source: Option<String>,
}

impl EquityFormat {
    pub fn none() -> Self {
        Self {
            class: EquityClass::None,
            source: None,
        }
    }
}

/// Classifies the equity column of a canonical table, inspecting only the
/// retained rows. Explicitly named columns win over the generic `equity`
/// column; the generic column's unit is inferred from its own maximum.
///
/// The max <= 100 rule is a heuristic: an issuer with fewer than 100 shares
/// outstanding would see share counts misread as percentages. Known
/// ambiguity, kept because real cap tables do not look like that.
pub(crate) fn detect_format(table: &RawTable, kept_rows: &[usize]) -> EquityFormat {
    for (candidates, class) in [
        (PERCENT_COLUMNS, EquityClass::Percentage),
        (SHARE_COLUMNS, EquityClass::Shares),
        (VALUE_COLUMNS, EquityClass::Value),
    ] {
        for candidate in candidates {
            if table.contains(candidate) {
                return EquityFormat {
                    class,
                    source: Some(candidate.to_string()),
                };
            }
        }
    }

    if table.contains(GENERIC_COLUMN) {
        let max = kept_rows
            .iter()
            .filter_map(|row| parse_number(table.value(GENERIC_COLUMN, *row)))
            .fold(None::<f64>, |acc, value| {
                Some(acc.map_or(value, |max| max.max(value)))
            });
        let class = match max {
            // Entirely non-numeric columns default to percentages.
            None => EquityClass::Percentage,
            Some(max) if max <= 100.0 => EquityClass::Percentage,
            Some(_) => EquityClass::Shares,
        };
        return EquityFormat {
            class,
            source: Some(GENERIC_COLUMN.to_string()),
        };
    }

    EquityFormat::none()
}

/// Converted equity values plus whether the feature participates in scoring.
/// Excluded features contribute no term at all to the weighted sum, so a
/// degenerate column cannot distort unrelated records.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EquityConversion {
    pub(crate) equity_pct: Vec<f64>,
    pub(crate) include_in_score: bool,
}

impl EquityConversion {
    fn excluded(len: usize) -> Self {
        Self {
            equity_pct: vec![0.0; len],
            include_in_score: false,
        }
    }
}

/// Maps raw per-person equity values onto the 0-100 scale. Missing values
/// count as 0. Degradation rules:
/// - percentages with an observed value above 100 are discarded wholesale
///   rather than trusted;
/// - share counts without a usable cap table contribute nothing, silently;
/// - grant values are min-max scaled against the largest observed grant.
pub(crate) fn convert(
    people: &[Person],
    format: &EquityFormat,
    cap_table: Option<&CapTable>,
) -> EquityConversion {
    let raw: Vec<f64> = people
        .iter()
        .map(|person| person.equity_raw.unwrap_or(0.0).max(0.0))
        .collect();

    match format.class {
        EquityClass::Percentage => {
            let max = raw.iter().cloned().fold(0.0_f64, f64::max);
            if max > 100.0 {
                return EquityConversion::excluded(people.len());
            }
            EquityConversion {
                equity_pct: raw,
                include_in_score: true,
            }
        }
        EquityClass::Shares => {
            let Some(cap_table) = cap_table.filter(|cap| cap.is_usable()) else {
                return EquityConversion::excluded(people.len());
            };
            let total = cap_table.total_shares_outstanding;
            EquityConversion {
                equity_pct: raw
                    .iter()
                    .map(|shares| (shares / total * 100.0).clamp(0.0, 100.0))
                    .collect(),
                include_in_score: true,
            }
        }
        EquityClass::Value => {
            let max = raw.iter().cloned().fold(0.0_f64, f64::max);
            if max <= 0.0 {
                return EquityConversion {
                    equity_pct: vec![0.0; people.len()],
                    include_in_score: true,
                };
            }
            EquityConversion {
                equity_pct: raw.iter().map(|value| value / max * 100.0).collect(),
                include_in_score: true,
            }
        }
        EquityClass::None => EquityConversion::excluded(people.len()),
    }
}
