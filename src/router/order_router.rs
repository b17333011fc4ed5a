use axum::{Router, routing::{get, post, put}};
use crate::handler::order_handler::{
    create_order_handler,
    list_orders_handler,
    list_policies_handler,
    get_order_handler,
    update_order_handler,
    update_policy_status_handler,
    delete_order_handler,
    bulk_delete_orders_handler,
    convert_quotation_handler,
};
use std::sync::Arc;
use crate::service::order_service::OrderServiceImpl;

pub fn order_router(service: Arc<OrderServiceImpl>) -> Router {
    Router::new()
        .route(
            "/departments/{department}/orders",
            get(list_orders_handler).post(create_order_handler),
        )
        .route(
            "/departments/{department}/orders/bulk-delete",
            post(bulk_delete_orders_handler),
        )
        .route(
            "/departments/{department}/orders/{id}",
            get(get_order_handler)
                .put(update_order_handler)
                .delete(delete_order_handler),
        )
        .route(
            "/departments/{department}/orders/{id}/policy-status",
            put(update_policy_status_handler),
        )
        .route("/departments/{department}/policies", get(list_policies_handler))
        // Conversion lives under the quotation but produces an order.
        .route(
            "/departments/{department}/quotations/{id}/convert",
            post(convert_quotation_handler),
        )
        .with_state(service)
}
