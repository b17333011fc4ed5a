use serde::Serialize;

const CARGO_PRODUCTS: &[&str] = &[
    "Marine Cargo",
    "Marine Cargo - Single Transit",
    "Marine Cargo - Open Cover",
    "Marine Cargo - Annual Policy",
    "Inland Transit",
    "Goods in Transit",
    "Stock Throughput",
];

const HULL_PRODUCTS: &[&str] = &[
    "Marine Hull",
    "Hull & Machinery",
    "Pleasure Craft",
    "Jet Ski",
    "Builders Risk",
    "Protection & Indemnity",
    "Ship Repairers Liability",
];

/// Marine KPI segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProductCategory {
    Cargo,
    Hull,
}

impl ProductCategory {
    /// `None` when the product belongs to neither fixed set.
    pub fn classify(product_type: &str) -> Option<Self> {
        let product_type = product_type.trim();
        let member = |set: &[&str]| set.iter().any(|p| p.eq_ignore_ascii_case(product_type));
        if member(CARGO_PRODUCTS) {
            Some(ProductCategory::Cargo)
        } else if member(HULL_PRODUCTS) {
            Some(ProductCategory::Hull)
        } else {
            None
        }
    }
}
