use std::collections::HashMap;

use chrono::NaiveDate;

use super::domain::Person;

const DAYS_PER_YEAR: f64 = 365.25;

/// Years between the start date and the reporting date, floored at zero.
/// Missing or unparseable start dates contribute exactly 0 rather than
/// excluding the record.
pub(crate) fn tenure_years(start_date: Option<NaiveDate>, today: NaiveDate) -> f64 {
    match start_date {
        Some(start) => ((today - start).num_days() as f64 / DAYS_PER_YEAR).max(0.0),
        None => 0.0,
    }
}

/// Direct-report counts over the retained working set: how many other
/// records name this record's id in `reports_to`. A self-reference counts
/// like any other report.
pub(crate) fn direct_report_counts(people: &[Person]) -> Vec<usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for person in people {
        if let Some(manager) = person.reports_to.as_deref() {
            *counts.entry(manager).or_insert(0) += 1;
        }
    }

    people
        .iter()
        .map(|person| counts.get(person.employee_id.as_str()).copied().unwrap_or(0))
        .collect()
}

/// Seniority weighting per level label. Unrecognized, empty, and missing
/// labels all land on the 1.0 baseline.
pub(crate) fn level_score(level: Option<&str>) -> f64 {
    match level.map(str::trim) {
        Some("C-Level") => 5.0,
        Some("VP") => 4.0,
        Some("Director") => 3.0,
        Some("Manager") => 2.0,
        Some("Staff") => 3.0,
        Some("Senior") => 3.0,
        Some("Mid") => 1.5,
        Some("Junior") => 1.0,
        _ => 1.0,
    }
}
