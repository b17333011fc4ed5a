use bson::{doc, Bson, Document};
use chrono::NaiveDate;

use crate::model::common::{BusinessType, PolicyStatus, QuotationStatus};
use crate::model::order::Order;
use crate::model::quotation::Quotation;

/// Case-insensitive "contains" over the free-text columns of a list view.
fn search_clause(term: &str, fields: &[&str]) -> Bson {
    let pattern = regex::escape(term);
    let clauses: Vec<Bson> = fields
        .iter()
        .map(|field| {
            let mut clause = Document::new();
            clause.insert(*field, doc! { "$regex": pattern.clone(), "$options": "i" });
            Bson::Document(clause)
        })
        .collect();
    Bson::Array(clauses)
}

fn date_clause(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<Document> {
    // Dates are persisted as ISO strings, so lexical order is calendar order.
    let mut range = Document::new();
    if let Some(from) = from {
        range.insert("$gte", from.to_string());
    }
    if let Some(to) = to {
        range.insert("$lte", to.to_string());
    }
    if range.is_empty() { None } else { Some(range) }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn within(date: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    from.map_or(true, |f| date >= f) && to.map_or(true, |t| date <= t)
}

fn non_blank(search: &Option<String>) -> Option<&str> {
    search.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct QuotationFilter {
    pub status: Option<QuotationStatus>,
    pub search: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl QuotationFilter {
    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();
        if let Some(status) = self.status {
            filter.insert("status", status.as_str());
        }
        if let Some(term) = non_blank(&self.search) {
            filter.insert("$or", search_clause(term, &["broker", "insured", "productType"]));
        }
        if let Some(range) = date_clause(self.from, self.to) {
            filter.insert("quotationDate", range);
        }
        filter
    }

    pub fn matches(&self, quotation: &Quotation) -> bool {
        if self.status.is_some_and(|s| s != quotation.status) {
            return false;
        }
        if let Some(term) = non_blank(&self.search) {
            let hit = contains_ignore_case(&quotation.broker, term)
                || contains_ignore_case(&quotation.insured, term)
                || contains_ignore_case(&quotation.product_type, term);
            if !hit {
                return false;
            }
        }
        within(quotation.quotation_date, self.from, self.to)
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub business_type: Option<BusinessType>,
    pub policy_status: Option<PolicyStatus>,
    pub search: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl OrderFilter {
    pub fn closed_policies() -> Self {
        OrderFilter {
            policy_status: Some(PolicyStatus::PolicyIssued),
            ..Default::default()
        }
    }

    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();
        if let Some(business_type) = self.business_type {
            filter.insert("businessType", business_type.as_str());
        }
        if let Some(policy_status) = self.policy_status {
            filter.insert("policyStatus", policy_status.as_str());
        }
        if let Some(term) = non_blank(&self.search) {
            filter.insert("$or", search_clause(term, &["broker", "insured", "productType"]));
        }
        if let Some(range) = date_clause(self.from, self.to) {
            filter.insert("orderDate", range);
        }
        filter
    }

    pub fn matches(&self, order: &Order) -> bool {
        if self.business_type.is_some_and(|b| b != order.business_type) {
            return false;
        }
        if self.policy_status.is_some_and(|p| p != order.policy_status) {
            return false;
        }
        if let Some(term) = non_blank(&self.search) {
            let hit = contains_ignore_case(&order.broker, term)
                || contains_ignore_case(&order.insured, term)
                || contains_ignore_case(&order.product_type, term);
            if !hit {
                return false;
            }
        }
        within(order.order_date, self.from, self.to)
    }
}
