use axum::{Router, routing::get};
use crate::handler::dashboard_handler::dashboard_handler;
use std::sync::Arc;
use crate::service::dashboard_service::DashboardServiceImpl;

pub fn dashboard_router(service: Arc<DashboardServiceImpl>) -> Router {
    Router::new()
        .route("/departments/{department}/dashboard", get(dashboard_handler))
        .with_state(service)
}
