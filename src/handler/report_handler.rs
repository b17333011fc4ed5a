use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::dto::report_dto::AnalysisReportRequest;
use crate::service::report_service::{ReportService, ReportServiceImpl};
use crate::util::error::HandlerError;

// Handler: Analysis report over a date range
pub async fn analysis_report_handler(
    State(service): State<Arc<ReportServiceImpl>>,
    Json(payload): Json<AnalysisReportRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate().map_err(HandlerError::validation)?;
    info!(from = %payload.from, to = %payload.to, "[analysis_report_handler] Handler called");
    let report = service.analysis_report(payload).await?;
    Ok(Json(report))
}
