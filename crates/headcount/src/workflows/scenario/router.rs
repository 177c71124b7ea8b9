use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::domain::CapTable;
use super::report::{self, SelectionRow};
use super::{CostSummary, EquityDisclosure, ScenarioEngine, ScoreWeights};
use crate::workflows::roster::{RosterImportError, RosterImporter};

/// Request-scoped scenario runner. The only cross-request state is the
/// externally supplied cap table; every plan call is a pure function of its
/// request.
pub struct ScenarioPlanner {
    cap_table: Option<CapTable>,
}

impl ScenarioPlanner {
    pub fn new(cap_table: Option<CapTable>) -> Self {
        Self { cap_table }
    }

    pub fn plan(&self, request: ScenarioRequest) -> Result<ScenarioResponse, RosterImportError> {
        let ScenarioRequest {
            roster_csv,
            target_headcount,
            weights,
            column_overrides,
            total_shares_outstanding,
            today,
            include_selection_csv,
        } = request;

        let snapshot = RosterImporter::from_reader_with_overrides(
            Cursor::new(roster_csv.into_bytes()),
            &column_overrides,
        )?;

        let cap_table = total_shares_outstanding
            .map(|total| CapTable {
                total_shares_outstanding: total,
            })
            .or(self.cap_table);
        let today = today.unwrap_or_else(|| Local::now().date_naive());

        let outcome = ScenarioEngine::new(weights).plan(
            &snapshot,
            target_headcount,
            cap_table.as_ref(),
            today,
        );

        let selection_csv = if include_selection_csv {
            Some(report::selection_csv(&outcome).map_err(RosterImportError::Csv)?)
        } else {
            None
        };

        info!(
            selected = outcome.summary.selected,
            total_available = outcome.summary.total_available,
            equity = outcome.equity.classification.label(),
            "scenario planned"
        );

        let view = outcome.view();
        Ok(ScenarioResponse {
            today,
            summary: view.summary,
            equity: view.equity,
            selection: view.selection,
            selection_csv,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ScenarioRequest {
    /// Raw roster CSV, exactly as exported.
    pub roster_csv: String,
    pub target_headcount: usize,
    #[serde(default)]
    pub weights: ScoreWeights,
    /// Canonical name -> source column, for exports the synonym table
    /// mis-detects.
    #[serde(default)]
    pub column_overrides: HashMap<String, String>,
    /// Overrides the configured cap table for share conversion.
    #[serde(default)]
    pub total_shares_outstanding: Option<f64>,
    /// Anchors tenure; defaults to the server's current date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
    #[serde(default)]
    pub include_selection_csv: bool,
}

#[derive(Debug, Serialize)]
pub struct ScenarioResponse {
    pub today: NaiveDate,
    pub summary: CostSummary,
    pub equity: EquityDisclosure,
    pub selection: Vec<SelectionRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_csv: Option<String>,
}

/// Router builder exposing the scenario endpoint.
pub fn scenario_router(planner: Arc<ScenarioPlanner>) -> Router {
    Router::new()
        .route("/api/v1/headcount/scenario", post(scenario_handler))
        .with_state(planner)
}

pub(crate) async fn scenario_handler(
    State(planner): State<Arc<ScenarioPlanner>>,
    axum::Json(request): axum::Json<ScenarioRequest>,
) -> Response {
    match planner.plan(request) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(error @ (RosterImportError::Schema(_) | RosterImportError::Csv(_))) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn request(target_headcount: usize) -> ScenarioRequest {
        ScenarioRequest {
            roster_csv: "employee_id,name,comp_usd\nE001,Ada,100000\nE002,Grace,200000\n"
                .to_string(),
            target_headcount,
            weights: ScoreWeights::default(),
            column_overrides: HashMap::new(),
            total_shares_outstanding: None,
            today: NaiveDate::from_ymd_opt(2026, 1, 1),
            include_selection_csv: false,
        }
    }

    #[test]
    fn planner_runs_a_request_end_to_end() {
        let planner = ScenarioPlanner::new(None);
        let response = planner.plan(request(1)).expect("plan succeeds");

        assert_eq!(response.summary.selected, 1);
        assert_eq!(response.summary.total_available, 2);
        assert_eq!(response.selection[0].employee_id, "E002");
        assert!(response.selection_csv.is_none());
    }

    #[test]
    fn planner_can_attach_a_csv_export() {
        let planner = ScenarioPlanner::new(None);
        let mut req = request(2);
        req.include_selection_csv = true;
        let response = planner.plan(req).expect("plan succeeds");
        let exported = response.selection_csv.expect("csv attached");
        assert!(exported.starts_with("employee_id,"));
    }

    #[test]
    fn request_level_cap_table_overrides_the_configured_one() {
        let planner = ScenarioPlanner::new(Some(CapTable {
            total_shares_outstanding: 1_000.0,
        }));
        let mut req = request(2);
        req.roster_csv =
            "employee_id,comp_usd,equity_shares\nE001,100000,25000000\n".to_string();
        req.total_shares_outstanding = Some(50_000_000.0);
        let response = planner.plan(req).expect("plan succeeds");
        assert_eq!(response.selection[0].equity_pct, 50.0);
    }

    #[tokio::test]
    async fn scenario_endpoint_rejects_unmappable_schemas() {
        let app = scenario_router(Arc::new(ScenarioPlanner::new(None)));
        let body = json!({
            "roster_csv": "employee_id,name\nE001,Ada\n",
            "target_headcount": 1,
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/headcount/scenario")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn scenario_endpoint_returns_a_summary() {
        let app = scenario_router(Arc::new(ScenarioPlanner::new(None)));
        let body = json!({
            "roster_csv": "employee_id,name,comp_usd\nE001,Ada,100000\nE002,Grace,200000\n",
            "target_headcount": 2,
            "today": "2026-01-01",
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/headcount/scenario")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(payload["summary"]["selected"], 2);
        assert_eq!(payload["summary"]["total_comp_usd"], 300_000);
        assert_eq!(payload["equity"]["classification"], "none");
    }
}
