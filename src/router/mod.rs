pub mod dashboard_router;
pub mod kpi_router;
pub mod order_router;
pub mod quotation_router;
pub mod report_router;
