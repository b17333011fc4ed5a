use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Underwriting department owning a pair of quotation/order collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "marine")]
    Marine,
    #[serde(rename = "property-engineering")]
    PropertyEngineering,
    #[serde(rename = "liability")]
    Liability,
}

impl Department {
    pub const ALL: [Department; 3] = [
        Department::Marine,
        Department::PropertyEngineering,
        Department::Liability,
    ];

    /// Slug used in URLs.
    pub fn slug(&self) -> &'static str {
        match self {
            Department::Marine => "marine",
            Department::PropertyEngineering => "property-engineering",
            Department::Liability => "liability",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Department::Marine => "Marine",
            Department::PropertyEngineering => "Property & Engineering",
            Department::Liability => "Liability & Financial",
        }
    }

    fn collection_stem(&self) -> &'static str {
        match self {
            Department::Marine => "marine",
            Department::PropertyEngineering => "property_engineering",
            Department::Liability => "liability",
        }
    }

    pub fn quotation_collection(&self, prefix: &str) -> String {
        format!("{}{}_quotations", prefix, self.collection_stem())
    }

    pub fn order_collection(&self, prefix: &str) -> String {
        format!("{}{}_orders", prefix, self.collection_stem())
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDepartment(pub String);

impl fmt::Display for UnknownDepartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown department: {}", self.0)
    }
}

impl std::error::Error for UnknownDepartment {}

impl FromStr for Department {
    type Err = UnknownDepartment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "marine" => Ok(Department::Marine),
            "property-engineering" | "property_engineering" | "pe" => Ok(Department::PropertyEngineering),
            "liability" | "liability-financial" | "lf" => Ok(Department::Liability),
            _ => Err(UnknownDepartment(s.to_string())),
        }
    }
}
