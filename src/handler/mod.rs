pub mod dashboard_handler;
pub mod kpi_handler;
pub mod order_handler;
pub mod quotation_handler;
pub mod report_handler;

use crate::model::department::Department;
use crate::util::error::HandlerError;

pub(crate) fn parse_department(raw: &str) -> Result<Department, HandlerError> {
    raw.parse::<Department>()
        .map_err(|e| HandlerError::bad_request(e.to_string()))
}
