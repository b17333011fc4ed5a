use axum::{Router, routing::get};
use crate::handler::kpi_handler::{production_kpi_handler, monthly_kpi_handler};
use std::sync::Arc;
use crate::service::kpi_service::KpiServiceImpl;

pub fn kpi_router(service: Arc<KpiServiceImpl>) -> Router {
    Router::new()
        .route("/kpi/production", get(production_kpi_handler))
        .route("/kpi/production/monthly", get(monthly_kpi_handler))
        .with_state(service)
}
