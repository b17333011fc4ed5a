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
use crate::dto::order_dto::{ConvertQuotationRequest, CreateOrderRequest, ListOrdersQuery, OrderResponse, UpdatePolicyStatusRequest};
use crate::handler::parse_department;
use crate::model::filter::OrderFilter;
use crate::service::order_service::{OrderService, OrderServiceImpl};
use crate::util::error::HandlerError;

fn order_request_quotation_id(payload: &CreateOrderRequest) -> Result<Option<bson::oid::ObjectId>, HandlerError> {
    payload
        .quotation_id
        .as_deref()
        .map(|raw| parse_object_id(raw, "quotation"))
        .transpose()
}

// Handler: Create Order
pub async fn create_order_handler(
    State(service): State<Arc<OrderServiceImpl>>,
    Path(department): Path<String>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let department = parse_department(&department)?;
    payload.validate().map_err(HandlerError::validation)?;
    let quotation_id = order_request_quotation_id(&payload)?;
    info!(%department, "[create_order_handler] Handler called");
    let created = service.create_order(department, payload.into_order(department, quotation_id)).await?;
    Ok((StatusCode::CREATED, Json(OrderResponse::from(created))))
}

// Handler: List Orders
pub async fn list_orders_handler(
    State(service): State<Arc<OrderServiceImpl>>,
    Path(department): Path<String>,
    Query(params): Query<ListOrdersQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let department = parse_department(&department)?;
    let paging = Paging::new(params.page, params.limit);
    let filter = OrderFilter {
        business_type: params.business_type,
        policy_status: params.policy_status,
        search: params.search,
        from: params.from,
        to: params.to,
    };
    let page = service.list_orders(department, filter, paging).await?;
    Ok(Json(page.map(OrderResponse::from)))
}

// Handler: List Closed Policies
pub async fn list_policies_handler(
    State(service): State<Arc<OrderServiceImpl>>,
    Path(department): Path<String>,
    Query(params): Query<ListOrdersQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let department = parse_department(&department)?;
    let paging = Paging::new(params.page, params.limit);
    let filter = OrderFilter {
        business_type: params.business_type,
        search: params.search,
        from: params.from,
        to: params.to,
        ..OrderFilter::closed_policies()
    };
    let page = service.list_orders(department, filter, paging).await?;
    Ok(Json(page.map(OrderResponse::from)))
}

// Handler: Get Order
pub async fn get_order_handler(
    State(service): State<Arc<OrderServiceImpl>>,
    Path((department, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, HandlerError> {
    let department = parse_department(&department)?;
    let id = parse_object_id(&id, "order")?;
    let order = service.get_order(department, id).await?;
    Ok(Json(OrderResponse::from(order)))
}

// Handler: Update Order (full edit form)
pub async fn update_order_handler(
    State(service): State<Arc<OrderServiceImpl>>,
    Path((department, id)): Path<(String, String)>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let department = parse_department(&department)?;
    let id = parse_object_id(&id, "order")?;
    payload.validate().map_err(HandlerError::validation)?;
    let quotation_id = order_request_quotation_id(&payload)?;
    let updated = service
        .update_order(department, id, payload, quotation_id)
        .await?;
    Ok(Json(OrderResponse::from(updated)))
}

// Handler: Update Policy Status
pub async fn update_policy_status_handler(
    State(service): State<Arc<OrderServiceImpl>>,
    Path((department, id)): Path<(String, String)>,
    Json(payload): Json<UpdatePolicyStatusRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let department = parse_department(&department)?;
    let id = parse_object_id(&id, "order")?;
    let updated = service.update_policy_status(department, id, payload.policy_status).await?;
    Ok(Json(OrderResponse::from(updated)))
}

// Handler: Delete Order
pub async fn delete_order_handler(
    State(service): State<Arc<OrderServiceImpl>>,
    Path((department, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, HandlerError> {
    let department = parse_department(&department)?;
    let id = parse_object_id(&id, "order")?;
    service.delete_order(department, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Handler: Bulk Delete Orders
pub async fn bulk_delete_orders_handler(
    State(service): State<Arc<OrderServiceImpl>>,
    Path(department): Path<String>,
    Json(payload): Json<BulkDeleteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let department = parse_department(&department)?;
    payload.validate().map_err(HandlerError::validation)?;
    let ids = payload
        .ids
        .iter()
        .map(|id| parse_object_id(id, "order"))
        .collect::<Result<Vec<_>, _>>()?;
    let deleted = service.delete_orders(department, ids).await?;
    Ok(Json(BulkDeleteResponse { deleted }))
}

// Handler: Convert Quotation to Order
pub async fn convert_quotation_handler(
    State(service): State<Arc<OrderServiceImpl>>,
    Path((department, id)): Path<(String, String)>,
    Json(payload): Json<ConvertQuotationRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let department = parse_department(&department)?;
    let quotation_id = parse_object_id(&id, "quotation")?;
    payload.validate().map_err(HandlerError::validation)?;
    let order = service.convert_quotation(department, quotation_id, payload).await?;
    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}
