//! Marine production KPIs: closing-day month attribution, Cargo/Hull
//! segmentation and actual-vs-target figures. Pure, no I/O.

pub mod aggregator;
pub mod category;
pub mod production_month;
pub mod targets;

pub use aggregator::{Granularity, KpiAggregator, KpiFigure, KpiSnapshot, ProductionRecord};
pub use category::ProductCategory;
pub use production_month::ProductionMonth;
pub use targets::TargetTable;
