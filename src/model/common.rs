use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    AED,
    USD,
    EUR,
    GBP,
    SAR,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::AED => "AED",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::SAR => "SAR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum QuotationStatus {
    #[default]
    Open,
    Confirmed,
    Decline,
}

impl QuotationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Open => "Open",
            QuotationStatus::Confirmed => "Confirmed",
            QuotationStatus::Decline => "Decline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessType {
    #[serde(rename = "New Business")]
    NewBusiness,
    Renewal,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::NewBusiness => "New Business",
            BusinessType::Renewal => "Renewal",
        }
    }
}

/// An order whose policy has been issued is a closed policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PolicyStatus {
    #[default]
    Pending,
    #[serde(rename = "Policy Issued")]
    PolicyIssued,
}

impl PolicyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::Pending => "Pending",
            PolicyStatus::PolicyIssued => "Policy Issued",
        }
    }
}
