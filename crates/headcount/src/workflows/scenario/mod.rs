pub mod domain;
pub mod equity;
pub mod report;
pub mod router;

mod config;
mod features;
mod scoring;
mod selection;

pub use config::ScoreWeights;
pub use router::{scenario_router, ScenarioPlanner, ScenarioRequest, ScenarioResponse};
pub use selection::CostSummary;

use chrono::NaiveDate;
use serde::Serialize;

use domain::{CapTable, RosterSnapshot, ScoredPerson};
use equity::{EquityClass, EquityFormat};
use scoring::FeatureColumns;

/// Stateless engine applying one set of weights to roster snapshots.
pub struct ScenarioEngine {
    weights: ScoreWeights,
}

impl ScenarioEngine {
    pub fn new(weights: ScoreWeights) -> Self {
        Self {
            weights: weights.clamped(),
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoreWeights::default())
    }

    /// Runs the full pipeline over an immutable snapshot: equity conversion,
    /// feature derivation, scoring, then top-N selection. `today` anchors
    /// tenure so a scenario is reproducible; callers pass the current date
    /// in normal operation.
    pub fn plan(
        &self,
        snapshot: &RosterSnapshot,
        target_headcount: usize,
        cap_table: Option<&CapTable>,
        today: NaiveDate,
    ) -> ScenarioOutcome {
        let conversion = equity::convert(&snapshot.people, &snapshot.equity, cap_table);
        let report_counts = features::direct_report_counts(&snapshot.people);

        let columns = FeatureColumns {
            compensation: snapshot
                .people
                .iter()
                .map(|person| person.comp_usd as f64)
                .collect(),
            tenure_years: snapshot
                .people
                .iter()
                .map(|person| features::tenure_years(person.start_date, today))
                .collect(),
            level_score: snapshot
                .people
                .iter()
                .map(|person| features::level_score(person.level.as_deref()))
                .collect(),
            direct_reports: report_counts.iter().map(|count| *count as f64).collect(),
            equity_pct: conversion.equity_pct.clone(),
            include_equity: conversion.include_in_score,
        };
        let impact_scores = scoring::impact_scores(&columns, &self.weights);

        let scored: Vec<ScoredPerson> = snapshot
            .people
            .iter()
            .enumerate()
            .map(|(i, person)| ScoredPerson {
                person: person.clone(),
                tenure_years: columns.tenure_years[i],
                direct_reports: report_counts[i],
                level_score: columns.level_score[i],
                equity_pct: conversion.equity_pct[i],
                impact_score: impact_scores[i],
            })
            .collect();

        let (selection, summary) = selection::select(scored, target_headcount);

        ScenarioOutcome {
            selection,
            summary,
            equity: EquityDisclosure::new(&snapshot.equity, conversion.include_in_score),
        }
    }
}

/// Result of one scenario run: the ordered selection, its cost statistics,
/// and how the equity figure should be read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub selection: Vec<ScoredPerson>,
    pub summary: CostSummary,
    pub equity: EquityDisclosure,
}

/// Equity-format metadata surfaced with every result so the consumer can
/// caption the figure correctly (true ownership percentage vs. relative
/// grant value) and see whether it influenced the ranking at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityDisclosure {
    pub classification: EquityClass,
    pub source_column: Option<String>,
    pub scale_label: &'static str,
    pub included_in_score: bool,
}

impl EquityDisclosure {
    fn new(format: &EquityFormat, included_in_score: bool) -> Self {
        Self {
            classification: format.class,
            source_column: format.source.clone(),
            scale_label: format.class.scale_label(),
            included_in_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::roster::RosterImporter;
    use std::io::Cursor;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date")
    }

    #[test]
    fn plan_ranks_by_weighted_score_and_reports_costs() {
        let csv = "employee_id,name,comp_usd\n\
E001,Mid,100000\n\
E002,Top,200000\n\
E003,Low,50000\n";
        let snapshot = RosterImporter::from_reader(Cursor::new(csv)).expect("import");
        let weights = ScoreWeights {
            compensation: 1.0,
            tenure: 0.0,
            seniority: 0.0,
            direct_reports: 0.0,
            equity: 0.0,
        };
        let outcome = ScenarioEngine::new(weights).plan(&snapshot, 2, None, today());

        assert_eq!(outcome.summary.selected, 2);
        assert_eq!(outcome.summary.total_available, 3);
        assert_eq!(outcome.selection[0].person.comp_usd, 200_000);
        assert_eq!(outcome.selection[1].person.comp_usd, 100_000);
        assert_eq!(outcome.summary.total_comp_usd, 300_000);
        assert_eq!(outcome.summary.average_comp_usd, 150_000);
        assert_eq!(outcome.summary.median_comp_usd, 150_000);
    }

    #[test]
    fn missing_equity_column_makes_equity_weight_irrelevant() {
        let csv = "employee_id,comp_usd,level\nE001,100000,VP\nE002,90000,Junior\n";
        let snapshot = RosterImporter::from_reader(Cursor::new(csv)).expect("import");

        let low = ScenarioEngine::new(ScoreWeights {
            equity: 0.0,
            ..ScoreWeights::default()
        })
        .plan(&snapshot, 2, None, today());
        let high = ScenarioEngine::new(ScoreWeights {
            equity: 5.0,
            ..ScoreWeights::default()
        })
        .plan(&snapshot, 2, None, today());

        assert_eq!(low.selection[0].impact_score, high.selection[0].impact_score);
        assert_eq!(low.selection[1].impact_score, high.selection[1].impact_score);
        assert_eq!(low.equity.classification, EquityClass::None);
        assert!(!low.equity.included_in_score);
    }

    #[test]
    fn negative_weights_are_floored() {
        let csv = "employee_id,comp_usd\nE001,100000\nE002,200000\n";
        let snapshot = RosterImporter::from_reader(Cursor::new(csv)).expect("import");
        let outcome = ScenarioEngine::new(ScoreWeights {
            compensation: -3.0,
            tenure: 0.0,
            seniority: 0.0,
            direct_reports: 0.0,
            equity: 0.0,
        })
        .plan(&snapshot, 2, None, today());

        // A floored weight scores everyone 0; input order breaks the tie.
        assert_eq!(outcome.selection[0].person.employee_id, "E001");
        assert_eq!(outcome.selection[0].impact_score, 0.0);
    }
}
