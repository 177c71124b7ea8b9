use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::NaiveDate;
use headcount::config::FinancialsConfig;
use headcount::workflows::scenario::domain::CapTable;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("'{value}' is not a YYYY-MM-DD date"))
}

/// Loads the cap table named by the financials config. Absent or malformed
/// files degrade to "no cap table": share-denominated equity then simply
/// drops out of scoring instead of failing the request.
pub(crate) fn load_cap_table(config: &FinancialsConfig) -> Option<CapTable> {
    let path = config.cap_table_path.as_deref()?;
    load_cap_table_from_path(path)
}

pub(crate) fn load_cap_table_from_path(path: &Path) -> Option<CapTable> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!(path = %path.display(), %err, "cap table not readable, equity from shares disabled");
            return None;
        }
    };

    match serde_json::from_str::<CapTable>(&contents) {
        Ok(cap_table) if cap_table.is_usable() => Some(cap_table),
        Ok(_) => {
            warn!(path = %path.display(), "cap table has no positive total_shares_outstanding");
            None
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "cap table is not valid JSON, equity from shares disabled");
            None
        }
    }
}
