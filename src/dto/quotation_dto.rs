use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::dto::common_dto::validate_premium;
use crate::model::common::{Currency, QuotationStatus};
use crate::model::department::Department;
use crate::model::quotation::Quotation;

fn has_reason(reason: &Option<String>) -> bool {
    reason.as_deref().is_some_and(|r| !r.trim().is_empty())
}

fn check_decline_reason(status: Option<QuotationStatus>, reason: &Option<String>) -> Result<(), ValidationError> {
    if status == Some(QuotationStatus::Decline) && !has_reason(reason) {
        return Err(ValidationError::new("decline_reason_required"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_quotation"))]
pub struct CreateQuotationRequest {
    #[validate(length(min = 2, max = 200))]
    pub broker: String,

    #[validate(length(min = 2, max = 200))]
    pub insured: String,

    #[validate(length(min = 2, max = 100))]
    pub product_type: String,

    #[validate(custom = "validate_premium")]
    pub estimated_premium: String,

    pub currency: Option<Currency>,

    pub quotation_date: NaiveDate,

    pub status: Option<QuotationStatus>,

    #[validate(length(max = 500))]
    pub decline_reason: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

fn validate_create_quotation(request: &CreateQuotationRequest) -> Result<(), ValidationError> {
    check_decline_reason(request.status, &request.decline_reason)
}

impl CreateQuotationRequest {
    pub fn into_quotation(self, department: Department) -> Quotation {
        let status = self.status.unwrap_or_default();
        Quotation {
            id: None,
            department,
            broker: self.broker.trim().to_string(),
            insured: self.insured.trim().to_string(),
            product_type: self.product_type.trim().to_string(),
            estimated_premium: self.estimated_premium.trim().to_string(),
            currency: self.currency.unwrap_or_default(),
            quotation_date: self.quotation_date,
            status,
            decline_reason: if status == QuotationStatus::Decline { self.decline_reason } else { None },
            notes: self.notes,
            created_at: None,
            updated_at: None,
        }
    }

    /// Overlays an edit onto the stored quotation. Omitted status, decline
    /// reason and currency keep their stored values.
    pub fn apply_to(self, existing: Quotation) -> Quotation {
        let status = self.status.unwrap_or(existing.status);
        let decline_reason = match status {
            QuotationStatus::Decline => self
                .decline_reason
                .filter(|r| !r.trim().is_empty())
                .or(existing.decline_reason),
            _ => None,
        };
        Quotation {
            broker: self.broker.trim().to_string(),
            insured: self.insured.trim().to_string(),
            product_type: self.product_type.trim().to_string(),
            estimated_premium: self.estimated_premium.trim().to_string(),
            currency: self.currency.unwrap_or(existing.currency),
            quotation_date: self.quotation_date,
            status,
            decline_reason,
            notes: self.notes,
            ..existing
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_status_change"))]
pub struct UpdateQuotationStatusRequest {
    pub status: QuotationStatus,

    #[validate(length(max = 500))]
    pub decline_reason: Option<String>,
}

fn validate_status_change(request: &UpdateQuotationStatusRequest) -> Result<(), ValidationError> {
    check_decline_reason(Some(request.status), &request.decline_reason)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuotationsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<QuotationStatus>,
    pub search: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationResponse {
    pub id: String,
    pub department: Department,
    pub broker: String,
    pub insured: String,
    pub product_type: String,
    pub estimated_premium: String,
    pub currency: Currency,
    pub quotation_date: NaiveDate,
    pub status: QuotationStatus,
    pub decline_reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Quotation> for QuotationResponse {
    fn from(q: Quotation) -> Self {
        QuotationResponse {
            id: q.id.map(|id| id.to_hex()).unwrap_or_default(),
            department: q.department,
            broker: q.broker,
            insured: q.insured,
            product_type: q.product_type,
            estimated_premium: q.estimated_premium,
            currency: q.currency,
            quotation_date: q.quotation_date,
            status: q.status,
            decline_reason: q.decline_reason,
            notes: q.notes,
            created_at: q.created_at,
            updated_at: q.updated_at,
        }
    }
}
