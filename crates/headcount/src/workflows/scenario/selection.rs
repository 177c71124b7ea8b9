use serde::Serialize;

use super::domain::ScoredPerson;

/// Aggregate cost statistics over a selection. All figures are whole-dollar
/// integers; averages and medians round toward zero and report 0 for an
/// empty selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostSummary {
    pub selected: usize,
    pub total_available: usize,
    pub total_comp_usd: i64,
    pub average_comp_usd: i64,
    pub median_comp_usd: i64,
}

/// Sorts descending by impact score (stable, so ties keep input order),
/// truncates to the target headcount clamped into `[0, len]`, and computes
/// cost statistics over what remains.
pub(crate) fn select(
    mut scored: Vec<ScoredPerson>,
    target_headcount: usize,
) -> (Vec<ScoredPerson>, CostSummary) {
    let total_available = scored.len();
    scored.sort_by(|a, b| b.impact_score.total_cmp(&a.impact_score));
    scored.truncate(target_headcount.min(total_available));

    let summary = CostSummary {
        selected: scored.len(),
        total_available,
        total_comp_usd: scored.iter().map(|person| person.person.comp_usd).sum(),
        average_comp_usd: average(&scored),
        median_comp_usd: median(&scored),
    };

    (scored, summary)
}

fn average(selection: &[ScoredPerson]) -> i64 {
    if selection.is_empty() {
        return 0;
    }
    let total: i64 = selection.iter().map(|person| person.person.comp_usd).sum();
    total / selection.len() as i64
}

fn median(selection: &[ScoredPerson]) -> i64 {
    if selection.is_empty() {
        return 0;
    }
    let mut comps: Vec<i64> = selection.iter().map(|person| person.person.comp_usd).collect();
    comps.sort_unstable();
    let mid = comps.len() / 2;
    if comps.len() % 2 == 1 {
        comps[mid]
    } else {
        (comps[mid - 1] + comps[mid]) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::scenario::domain::Person;

    fn scored(id: &str, comp_usd: i64, impact_score: f64) -> ScoredPerson {
        ScoredPerson {
            person: Person {
                employee_id: id.to_string(),
                name: String::new(),
                role: String::new(),
                department: String::new(),
                location: String::new(),
                comp_usd,
                reports_to: None,
                start_date: None,
                level: None,
                equity_raw: None,
            },
            tenure_years: 0.0,
            direct_reports: 0,
            level_score: 1.0,
            equity_pct: 0.0,
            impact_score,
        }
    }

    #[test]
    fn selection_is_sorted_descending_and_truncated() {
        let pool = vec![
            scored("E001", 100_000, 0.5),
            scored("E002", 200_000, 1.0),
            scored("E003", 50_000, 0.25),
        ];
        let (selection, summary) = select(pool, 2);

        assert_eq!(selection.len(), 2);
        assert_eq!(selection[0].person.employee_id, "E002");
        assert_eq!(selection[1].person.employee_id, "E001");
        assert_eq!(summary.total_comp_usd, 300_000);
        assert_eq!(summary.average_comp_usd, 150_000);
        assert_eq!(summary.median_comp_usd, 150_000);
        assert_eq!(summary.total_available, 3);
    }

    #[test]
    fn ties_preserve_input_order() {
        let pool = vec![
            scored("E001", 1, 1.0),
            scored("E002", 2, 1.0),
            scored("E003", 3, 1.0),
        ];
        let (selection, _) = select(pool, 3);
        let ids: Vec<&str> = selection
            .iter()
            .map(|person| person.person.employee_id.as_str())
            .collect();
        assert_eq!(ids, ["E001", "E002", "E003"]);
    }

    #[test]
    fn oversized_target_is_clamped_to_pool_size() {
        let pool = vec![scored("E001", 100, 1.0)];
        let (selection, summary) = select(pool, 10);
        assert_eq!(selection.len(), 1);
        assert_eq!(summary.selected, 1);
    }

    #[test]
    fn empty_selection_reports_zero_statistics() {
        let (selection, summary) = select(Vec::new(), 0);
        assert!(selection.is_empty());
        assert_eq!(summary.total_comp_usd, 0);
        assert_eq!(summary.average_comp_usd, 0);
        assert_eq!(summary.median_comp_usd, 0);

        let pool = vec![scored("E001", 100, 1.0)];
        let (selection, summary) = select(pool, 0);
        assert!(selection.is_empty());
        assert_eq!(summary.total_available, 1);
    }

    #[test]
    fn even_sized_median_rounds_toward_zero() {
        let pool = vec![scored("E001", 100_001, 1.0), scored("E002", 100_000, 0.5)];
        let (_, summary) = select(pool, 2);
        assert_eq!(summary.median_comp_usd, 100_000);
    }
}
