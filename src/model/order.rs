use bson::oid::ObjectId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::common::{BusinessType, Currency, PolicyStatus};
use crate::model::department::Department;

/// Bound business. `quotation_id` is informational only, nothing enforces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub department: Department,
    pub quotation_id: Option<ObjectId>,
    pub broker: String,
    pub insured: String,
    pub product_type: String,
    pub premium: String,
    pub currency: Currency,
    pub business_type: BusinessType,
    pub order_date: NaiveDate,
    pub requires_satisfactory_survey: Option<bool>,
    #[serde(default)]
    pub policy_status: PolicyStatus,
    pub notes: Option<String>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Order {
    pub fn is_closed_policy(&self) -> bool {
        self.policy_status == PolicyStatus::PolicyIssued
    }
}
