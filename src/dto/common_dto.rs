use bson::oid::ObjectId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::{Validate, ValidationError};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 200;

/// Largest premium accepted on write (one quadrillion).
pub const MAX_PREMIUM: i64 = 1_000_000_000_000_000;

/// Premiums travel as strings; they must hold a non-negative decimal no
/// larger than [`MAX_PREMIUM`]. Thousands separators are accepted.
pub fn validate_premium(value: &str) -> Result<(), ValidationError> {
    let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
    match Decimal::from_str(&cleaned) {
        Ok(amount) if amount.is_sign_negative() && !amount.is_zero() => Err(ValidationError::new("negative_premium")),
        Ok(amount) if amount > Decimal::from(MAX_PREMIUM) => Err(ValidationError::new("premium_too_large")),
        Ok(_) => Ok(()),
        Err(_) => Err(ValidationError::new("invalid_premium")),
    }
}

pub fn parse_object_id(raw: &str, what: &str) -> Result<ObjectId, crate::util::error::HandlerError> {
    ObjectId::parse_str(raw.trim())
        .map_err(|_| crate::util::error::HandlerError::bad_request(format!("Invalid {} id: {}", what, raw)))
}

/// Normalized paging parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: u32,
    pub limit: u32,
}

impl Paging {
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Paging {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkDeleteRequest {
    #[validate(length(min = 1, max = 500))]
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    pub deleted: u64,
}
