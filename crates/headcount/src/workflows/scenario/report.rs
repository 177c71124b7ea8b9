//! Serializable views over a scenario outcome, plus CSV export of the
//! selection for downstream spreadsheets.

use serde::Serialize;

use super::{CostSummary, EquityDisclosure, ScenarioOutcome};

/// One selected person, flattened to the columns a reviewer cares about.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionRow {
    pub employee_id: String,
    pub name: String,
    pub role: String,
    pub department: String,
    pub location: String,
    pub comp_usd: i64,
    pub equity_pct: f64,
    pub impact_score: f64,
}

/// Presentation-ready summary of one scenario run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioView {
    pub summary: CostSummary,
    pub equity: EquityDisclosure,
    pub selection: Vec<SelectionRow>,
}

impl ScenarioOutcome {
    pub fn view(&self) -> ScenarioView {
        let selection = self
            .selection
            .iter()
            .map(|scored| SelectionRow {
                employee_id: scored.person.employee_id.clone(),
                name: scored.person.name.clone(),
                role: scored.person.role.clone(),
                department: scored.person.department.clone(),
                location: scored.person.location.clone(),
                comp_usd: scored.person.comp_usd,
                equity_pct: scored.equity_pct,
                impact_score: scored.impact_score,
            })
            .collect();

        ScenarioView {
            summary: self.summary,
            equity: self.equity.clone(),
            selection,
        }
    }
}

/// Renders the selection as CSV, in ranking order.
pub fn selection_csv(outcome: &ScenarioOutcome) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in outcome.view().selection {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(csv::IntoInnerError::into_error)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
