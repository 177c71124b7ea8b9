use std::collections::HashMap;

use tracing::debug;

use super::mapping;
use super::parser::{normalize_header, parse_date, parse_number, RawTable};
use crate::workflows::scenario::domain::{Person, RosterSnapshot};
use crate::workflows::scenario::equity;

/// Fatal schema problems detected while normalizing a roster table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("no compensation column after normalization (found: {})", .headers.join(", "))]
    MissingCompensation { headers: Vec<String> },
    #[error("column override references unknown column '{column}'")]
    UnknownColumn { column: String },
}

/// Applies the synonym table and caller overrides to a copy of the input
/// table, leaving the caller's table untouched. Overrides copy an existing
/// source column over a canonical name and may replace it; synonym renames
/// never do.
pub(crate) fn canonicalize(
    table: &RawTable,
    overrides: &HashMap<String, String>,
) -> Result<RawTable, SchemaError> {
    let mut canonical = table.clone();

    for (candidate, target) in mapping::SYNONYMS {
        if canonical.contains(candidate) && !canonical.contains(target) {
            canonical.rename_column(candidate, target);
        }
    }

    for (target, source) in overrides {
        let source = normalize_header(source);
        if !canonical.contains(&source) {
            return Err(SchemaError::UnknownColumn { column: source });
        }
        canonical.copy_column(&source, &normalize_header(target));
    }

    if !canonical.contains(mapping::COMP_USD) {
        return Err(SchemaError::MissingCompensation {
            headers: canonical.headers().to_vec(),
        });
    }

    Ok(canonical)
}

/// Filters the canonical table down to scoreable rows and parses each into a
/// typed [`Person`]. Real-world exports append footer/summary rows; when an
/// id column is present only ids with the employee prefix survive, otherwise
/// synthetic ids are assigned in input order.
pub(crate) fn build_snapshot(canonical: &RawTable) -> RosterSnapshot {
    let has_id_column = canonical.contains(mapping::EMPLOYEE_ID);
    let mut kept_rows = Vec::new();
    let mut comps = Vec::new();

    for row in 0..canonical.row_count() {
        let Some(comp) = parse_number(canonical.value(mapping::COMP_USD, row)) else {
            continue;
        };
        if has_id_column && !canonical.value(mapping::EMPLOYEE_ID, row).starts_with('E') {
            continue;
        }
        kept_rows.push(row);
        comps.push(comp as i64);
    }

    if kept_rows.len() < canonical.row_count() {
        debug!(
            kept = kept_rows.len(),
            total = canonical.row_count(),
            "dropped roster rows without usable compensation or employee id"
        );
    }

    let format = equity::detect_format(canonical, &kept_rows);

    let people = kept_rows
        .iter()
        .zip(comps)
        .enumerate()
        .map(|(index, (&row, comp_usd))| {
            let employee_id = if has_id_column {
                canonical.value(mapping::EMPLOYEE_ID, row).to_string()
            } else {
                format!("U{:04}", index + 1)
            };
            let equity_raw = format
                .source
                .as_deref()
                .and_then(|source| parse_number(canonical.value(source, row)));

            Person {
                employee_id,
                name: canonical.value(mapping::NAME, row).to_string(),
                role: canonical.value(mapping::ROLE, row).to_string(),
                department: canonical.value(mapping::DEPARTMENT, row).to_string(),
                location: canonical.value(mapping::LOCATION, row).to_string(),
                comp_usd,
                reports_to: non_empty(canonical.value(mapping::REPORTS_TO, row)),
                start_date: parse_date(canonical.value(mapping::START_DATE, row)),
                level: non_empty(canonical.value(mapping::LEVEL, row)),
                equity_raw,
            }
        })
        .collect();

    RosterSnapshot {
        people,
        equity: format,
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
