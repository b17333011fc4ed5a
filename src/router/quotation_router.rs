use axum::{Router, routing::{get, post, put}};
use crate::handler::quotation_handler::{
    create_quotation_handler,
    list_quotations_handler,
    get_quotation_handler,
    update_quotation_handler,
    update_quotation_status_handler,
    delete_quotation_handler,
    bulk_delete_quotations_handler,
};
use std::sync::Arc;
use crate::service::quotation_service::QuotationServiceImpl;

pub fn quotation_router(service: Arc<QuotationServiceImpl>) -> Router {
    Router::new()
        .route(
            "/departments/{department}/quotations",
            get(list_quotations_handler).post(create_quotation_handler),
        )
        .route(
            "/departments/{department}/quotations/bulk-delete",
            post(bulk_delete_quotations_handler),
        )
        .route(
            "/departments/{department}/quotations/{id}",
            get(get_quotation_handler)
                .put(update_quotation_handler)
                .delete(delete_quotation_handler),
        )
        .route(
            "/departments/{department}/quotations/{id}/status",
            put(update_quotation_status_handler),
        )
        .with_state(service)
}
