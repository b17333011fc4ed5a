use axum::{Router, routing::post};
use crate::handler::report_handler::analysis_report_handler;
use std::sync::Arc;
use crate::service::report_service::ReportServiceImpl;

pub fn report_router(service: Arc<ReportServiceImpl>) -> Router {
    Router::new()
        .route("/reports/analysis", post(analysis_report_handler))
        .with_state(service)
}
