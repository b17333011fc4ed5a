pub mod common_dto;
pub mod dashboard_dto;
pub mod kpi_dto;
pub mod order_dto;
pub mod quotation_dto;
pub mod report_dto;
