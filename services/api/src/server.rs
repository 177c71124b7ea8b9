use crate::cli::ServeArgs;
use crate::infra::{self, AppState};
use crate::routes::with_scenario_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use headcount::config::AppConfig;
use headcount::error::AppError;
use headcount::telemetry;
use headcount::workflows::scenario::ScenarioPlanner;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let cap_table = infra::load_cap_table(&config.financials);
    let planner = Arc::new(ScenarioPlanner::new(cap_table));

    let app = with_scenario_routes(planner)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "headcount scenario service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
