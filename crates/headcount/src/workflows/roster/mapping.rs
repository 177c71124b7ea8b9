//! Canonical roster schema and the synonym table that maps common HR-export
//! column names onto it.

pub(crate) const EMPLOYEE_ID: &str = "employee_id";
pub(crate) const NAME: &str = "name";
pub(crate) const ROLE: &str = "role";
pub(crate) const DEPARTMENT: &str = "department";
pub(crate) const LOCATION: &str = "location";
pub(crate) const COMP_USD: &str = "comp_usd";
pub(crate) const REPORTS_TO: &str = "reports_to";
pub(crate) const START_DATE: &str = "start_date";
pub(crate) const LEVEL: &str = "level";

/// Ordered `(candidate, canonical)` pairs, consulted first match wins. A
/// rename never overwrites a column that already carries the canonical name.
pub(crate) const SYNONYMS: &[(&str, &str)] = &[
    ("employee_name", NAME),
    ("title", ROLE),
    ("position", ROLE),
    ("dept", DEPARTMENT),
    ("team", DEPARTMENT),
    ("manager", REPORTS_TO),
    ("manager_id", REPORTS_TO),
    ("salary", COMP_USD),
    ("total_comp", COMP_USD),
    ("id", EMPLOYEE_ID),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::roster::parser::RawTable;

    fn column(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn synonyms_rename_in_priority_order() {
        let mut table = RawTable::from_columns([
            ("title", column(&["Engineer"])),
            ("position", column(&["IC"])),
        ]);
        for (candidate, canonical) in SYNONYMS {
            if table.contains(candidate) && !table.contains(canonical) {
                table.rename_column(candidate, canonical);
            }
        }
        // `title` outranks `position`, which stays behind untouched.
        assert_eq!(table.column(ROLE).unwrap(), &column(&["Engineer"]));
        assert!(table.contains("position"));
    }

    #[test]
    fn existing_canonical_column_is_not_overwritten() {
        let mut table = RawTable::from_columns([
            ("comp_usd", column(&["100000"])),
            ("salary", column(&["1"])),
        ]);
        for (candidate, canonical) in SYNONYMS {
            if table.contains(candidate) && !table.contains(canonical) {
                table.rename_column(candidate, canonical);
            }
        }
        assert_eq!(table.column(COMP_USD).unwrap(), &column(&["100000"]));
        assert!(table.contains("salary"));
    }
}
