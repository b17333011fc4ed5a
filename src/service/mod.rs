pub mod dashboard_service;
pub mod kpi_service;
pub mod order_service;
pub mod quotation_service;
pub mod report_service;
