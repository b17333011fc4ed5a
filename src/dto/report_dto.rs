use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::model::department::Department;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_range"))]
pub struct AnalysisReportRequest {
    /// All departments when absent.
    pub department: Option<Department>,
    pub from: NaiveDate,
    pub to: NaiveDate,
    #[validate(length(max = 4000))]
    pub instructions: Option<String>,
}

fn validate_range(request: &AnalysisReportRequest) -> Result<(), ValidationError> {
    if request.from > request.to {
        return Err(ValidationError::new("from_after_to"));
    }
    Ok(())
}

/// Per-department production figures sent to the analysis endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDigest {
    pub department: Department,
    pub department_name: String,
    pub quotation_count: usize,
    pub confirmed_quotations: usize,
    pub declined_quotations: usize,
    pub quoted_premium: Decimal,
    pub order_count: usize,
    pub new_business_orders: usize,
    pub renewal_orders: usize,
    pub closed_policies: usize,
    pub order_premium: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionDigest {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub departments: Vec<DepartmentDigest>,
    pub total_order_premium: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReportResponse {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub summary: String,
    pub digest: ProductionDigest,
}
