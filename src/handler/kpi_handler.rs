use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::dto::kpi_dto::KpiQuery;
use crate::service::kpi_service::{KpiService, KpiServiceImpl};
use crate::util::error::HandlerError;

const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

fn check_year(year: Option<i32>) -> Result<(), HandlerError> {
    match year {
        Some(year) if !YEAR_RANGE.contains(&year) => Err(HandlerError::bad_request(format!(
            "year must be between {} and {}, got {}",
            YEAR_RANGE.start(),
            YEAR_RANGE.end(),
            year
        ))),
        _ => Ok(()),
    }
}

// Handler: Production KPI snapshot (whole year or one month)
pub async fn production_kpi_handler(
    State(service): State<Arc<KpiServiceImpl>>,
    Query(params): Query<KpiQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    check_year(params.year)?;
    if let Some(month) = params.month {
        if month > 11 {
            return Err(HandlerError::bad_request(format!("month must be between 0 and 11, got {}", month)));
        }
    }
    let snapshot = service.production_snapshot(params.year, params.month).await?;
    Ok(Json(snapshot))
}

// Handler: Production KPI per month
pub async fn monthly_kpi_handler(
    State(service): State<Arc<KpiServiceImpl>>,
    Query(params): Query<KpiQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    check_year(params.year)?;
    let breakdown = service.monthly_production(params.year).await?;
    Ok(Json(breakdown))
}
