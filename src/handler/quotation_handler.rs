use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::dto::common_dto::{parse_object_id, BulkDeleteRequest, BulkDeleteResponse, Paging};
use crate::dto::quotation_dto::{CreateQuotationRequest, ListQuotationsQuery, QuotationResponse, UpdateQuotationStatusRequest};
use crate::handler::parse_department;
use crate::model::filter::QuotationFilter;
use crate::service::quotation_service::{QuotationService, QuotationServiceImpl};
use crate::util::error::HandlerError;

// Handler: Create Quotation
pub async fn create_quotation_handler(
    State(service): State<Arc<QuotationServiceImpl>>,
    Path(department): Path<String>,
    Json(payload): Json<CreateQuotationRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let department = parse_department(&department)?;
    payload.validate().map_err(HandlerError::validation)?;
    info!(%department, "[create_quotation_handler] Handler called");
    let created = service.create_quotation(department, payload.into_quotation(department)).await?;
    Ok((StatusCode::CREATED, Json(QuotationResponse::from(created))))
}

// Handler: List Quotations
pub async fn list_quotations_handler(
    State(service): State<Arc<QuotationServiceImpl>>,
    Path(department): Path<String>,
    Query(params): Query<ListQuotationsQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let department = parse_department(&department)?;
    let paging = Paging::new(params.page, params.limit);
    let filter = QuotationFilter {
        status: params.status,
        search: params.search,
        from: params.from,
        to: params.to,
    };
    let page = service.list_quotations(department, filter, paging).await?;
    Ok(Json(page.map(QuotationResponse::from)))
}

// Handler: Get Quotation
pub async fn get_quotation_handler(
    State(service): State<Arc<QuotationServiceImpl>>,
    Path((department, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, HandlerError> {
    let department = parse_department(&department)?;
    let id = parse_object_id(&id, "quotation")?;
    let quotation = service.get_quotation(department, id).await?;
    Ok(Json(QuotationResponse::from(quotation)))
}

// Handler: Update Quotation (full edit form)
pub async fn update_quotation_handler(
    State(service): State<Arc<QuotationServiceImpl>>,
    Path((department, id)): Path<(String, String)>,
    Json(payload): Json<CreateQuotationRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let department = parse_department(&department)?;
    let id = parse_object_id(&id, "quotation")?;
    payload.validate().map_err(HandlerError::validation)?;
    let updated = service
        .update_quotation(department, id, payload)
        .await?;
    Ok(Json(QuotationResponse::from(updated)))
}

// Handler: Update Quotation Status
pub async fn update_quotation_status_handler(
    State(service): State<Arc<QuotationServiceImpl>>,
    Path((department, id)): Path<(String, String)>,
    Json(payload): Json<UpdateQuotationStatusRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let department = parse_department(&department)?;
    let id = parse_object_id(&id, "quotation")?;
    payload.validate().map_err(HandlerError::validation)?;
    let updated = service
        .update_quotation_status(department, id, payload.status, payload.decline_reason)
        .await?;
    Ok(Json(QuotationResponse::from(updated)))
}

// Handler: Delete Quotation
pub async fn delete_quotation_handler(
    State(service): State<Arc<QuotationServiceImpl>>,
    Path((department, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, HandlerError> {
    let department = parse_department(&department)?;
    let id = parse_object_id(&id, "quotation")?;
    service.delete_quotation(department, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Handler: Bulk Delete Quotations
pub async fn bulk_delete_quotations_handler(
    State(service): State<Arc<QuotationServiceImpl>>,
    Path(department): Path<String>,
    Json(payload): Json<BulkDeleteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let department = parse_department(&department)?;
    payload.validate().map_err(HandlerError::validation)?;
    let ids = payload
        .ids
        .iter()
        .map(|id| parse_object_id(id, "quotation"))
        .collect::<Result<Vec<_>, _>>()?;
    let deleted = service.delete_quotations(department, ids).await?;
    Ok(Json(BulkDeleteResponse { deleted }))
}
