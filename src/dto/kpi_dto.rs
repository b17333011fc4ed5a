use serde::{Deserialize, Serialize};

use crate::kpi::KpiSnapshot;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KpiQuery {
    pub year: Option<i32>,
    /// Zero-based; absent means the whole year.
    pub month: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyKpiResponse {
    pub year: i32,
    pub target_year: i32,
    /// Years with their own target table; others fall back to the default.
    pub known_target_years: Vec<i32>,
    pub months: Vec<KpiSnapshot>,
}
