use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::handler::parse_department;
use crate::service::dashboard_service::{DashboardService, DashboardServiceImpl};
use crate::util::error::HandlerError;

pub async fn dashboard_handler(
    State(service): State<Arc<DashboardServiceImpl>>,
    Path(department): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let department = parse_department(&department)?;
    let summary = service.summary(department).await?;
    Ok(Json(summary))
}
