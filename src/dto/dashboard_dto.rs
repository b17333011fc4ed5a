use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::department::Department;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationCounts {
    pub total: usize,
    pub open: usize,
    pub confirmed: usize,
    pub declined: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCounts {
    pub total: usize,
    pub new_business: usize,
    pub renewal: usize,
    pub closed_policies: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPremium {
    pub product_type: String,
    pub order_count: usize,
    pub premium: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub department: Department,
    pub department_name: String,
    pub quotations: QuotationCounts,
    /// Confirmed share of all quotations, `None` with no quotations.
    pub confirmation_rate: Option<Decimal>,
    pub orders: OrderCounts,
    pub total_premium: Decimal,
    pub premium_by_product: Vec<ProductPremium>,
}
