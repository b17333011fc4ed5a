use bson::oid::ObjectId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::common::{Currency, QuotationStatus};
use crate::model::department::Department;

/// A priced offer awaiting broker/insured confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub department: Department,
    pub broker: String,
    pub insured: String,
    pub product_type: String,
    /// Decimal kept as text.
    pub estimated_premium: String,
    pub currency: Currency,
    pub quotation_date: NaiveDate,
    pub status: QuotationStatus,
    pub decline_reason: Option<String>,
    pub notes: Option<String>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
