use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::common_dto::validate_premium;
use crate::model::common::{BusinessType, Currency, PolicyStatus};
use crate::model::department::Department;
use crate::model::order::Order;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(length(min = 2, max = 200))]
    pub broker: String,

    #[validate(length(min = 2, max = 200))]
    pub insured: String,

    #[validate(length(min = 2, max = 100))]
    pub product_type: String,

    #[validate(custom = "validate_premium")]
    pub premium: String,

    pub currency: Option<Currency>,

    pub business_type: BusinessType,

    pub order_date: NaiveDate,

    pub requires_satisfactory_survey: Option<bool>,

    pub policy_status: Option<PolicyStatus>,

    #[validate(length(equal = 24))]
    pub quotation_id: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl CreateOrderRequest {
    /// `quotation_id` must already have been checked by the caller.
    pub fn into_order(self, department: Department, quotation_id: Option<bson::oid::ObjectId>) -> Order {
        Order {
            id: None,
            department,
            quotation_id,
            broker: self.broker.trim().to_string(),
            insured: self.insured.trim().to_string(),
            product_type: self.product_type.trim().to_string(),
            premium: self.premium.trim().to_string(),
            currency: self.currency.unwrap_or_default(),
            business_type: self.business_type,
            order_date: self.order_date,
            requires_satisfactory_survey: self.requires_satisfactory_survey,
            policy_status: self.policy_status.unwrap_or_default(),
            notes: self.notes,
            created_at: None,
            updated_at: None,
        }
    }

    /// Overlays an edit onto the stored order. Omitted policy status,
    /// currency and quotation link keep their stored values.
    pub fn apply_to(self, existing: Order, quotation_id: Option<bson::oid::ObjectId>) -> Order {
        Order {
            quotation_id: quotation_id.or(existing.quotation_id),
            broker: self.broker.trim().to_string(),
            insured: self.insured.trim().to_string(),
            product_type: self.product_type.trim().to_string(),
            premium: self.premium.trim().to_string(),
            currency: self.currency.unwrap_or(existing.currency),
            business_type: self.business_type,
            order_date: self.order_date,
            requires_satisfactory_survey: self.requires_satisfactory_survey,
            policy_status: self.policy_status.unwrap_or(existing.policy_status),
            notes: self.notes,
            ..existing
        }
    }
}

/// Turns a confirmed quotation into bound business.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConvertQuotationRequest {
    pub business_type: BusinessType,

    /// Defaults to today.
    pub order_date: Option<NaiveDate>,

    /// Defaults to the quotation's estimated premium.
    #[validate(custom = "validate_premium")]
    pub premium: Option<String>,

    pub requires_satisfactory_survey: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePolicyStatusRequest {
    pub policy_status: PolicyStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub business_type: Option<BusinessType>,
    pub policy_status: Option<PolicyStatus>,
    pub search: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub department: Department,
    pub quotation_id: Option<String>,
    pub broker: String,
    pub insured: String,
    pub product_type: String,
    pub premium: String,
    pub currency: Currency,
    pub business_type: BusinessType,
    pub order_date: NaiveDate,
    pub requires_satisfactory_survey: Option<bool>,
    pub policy_status: PolicyStatus,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        OrderResponse {
            id: o.id.map(|id| id.to_hex()).unwrap_or_default(),
            department: o.department,
            quotation_id: o.quotation_id.map(|id| id.to_hex()),
            broker: o.broker,
            insured: o.insured,
            product_type: o.product_type,
            premium: o.premium,
            currency: o.currency,
            business_type: o.business_type,
            order_date: o.order_date,
            requires_satisfactory_survey: o.requires_satisfactory_survey,
            policy_status: o.policy_status,
            notes: o.notes,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}
