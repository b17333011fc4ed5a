use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

use crate::kpi::category::ProductCategory;
use crate::kpi::production_month::ProductionMonth;
use crate::kpi::targets::{CategoryTarget, TargetTable, YearTargets};
use crate::model::order::Order;

/// What the aggregator needs from an order row.
pub trait ProductionRecord {
    fn order_date(&self) -> NaiveDate;
    fn premium(&self) -> &str;
    fn product_type(&self) -> &str;
}

impl ProductionRecord for Order {
    fn order_date(&self) -> NaiveDate {
        self.order_date
    }

    fn premium(&self) -> &str {
        &self.premium
    }

    fn product_type(&self) -> &str {
        &self.product_type
    }
}

/// Lenient premium parse: anything that is not a number counts as zero.
pub fn parse_premium(raw: &str) -> Decimal {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or(Decimal::ZERO)
}

/// Saturating premium total; stored rows are not trusted to stay in range.
pub fn sum_premiums<I: IntoIterator<Item = Decimal>>(premiums: I) -> Decimal {
    premiums.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Year,
    /// Zero-based month index.
    Month(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiFigure {
    pub actual: Decimal,
    pub target: Decimal,
    pub variance: Decimal,
    /// `None` when the target is zero or the ratio does not fit a decimal.
    pub progress: Option<Decimal>,
}

impl KpiFigure {
    pub fn new(actual: Decimal, target: Decimal) -> Self {
        let progress = if target.is_zero() {
            None
        } else {
            actual
                .checked_div(target)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .map(|progress| progress.round_dp(2))
        };
        KpiFigure {
            actual,
            target,
            variance: actual.saturating_sub(target),
            progress,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    pub year: i32,
    pub month: Option<u32>,
    pub target_year: i32,
    pub live_year: bool,
    pub cargo: KpiFigure,
    pub hull: KpiFigure,
    pub total: KpiFigure,
    /// Orders produced in the window, categorised or not.
    pub order_count: usize,
    pub uncategorised_count: usize,
}

#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    cargo: Decimal,
    hull: Decimal,
    orders: usize,
    uncategorised: usize,
}

impl Bucket {
    fn add(&mut self, category: Option<ProductCategory>, premium: Decimal) {
        self.orders += 1;
        match category {
            Some(ProductCategory::Cargo) => self.cargo = self.cargo.saturating_add(premium),
            Some(ProductCategory::Hull) => self.hull = self.hull.saturating_add(premium),
            None => self.uncategorised += 1,
        }
    }
}

/// Actual-vs-target premium production for the Marine Cargo/Hull segments.
///
/// When `live_year` is set, every order produced in that year is booked to
/// January and the other months report zero actual. Past years are bucketed
/// month by month.
#[derive(Debug, Clone, Copy)]
pub struct KpiAggregator<'a> {
    targets: &'a TargetTable,
    live_year: Option<i32>,
}

impl<'a> KpiAggregator<'a> {
    pub fn new(targets: &'a TargetTable, live_year: Option<i32>) -> Self {
        KpiAggregator { targets, live_year }
    }

    pub fn compute<R: ProductionRecord>(&self, orders: &[R], year: i32, granularity: Granularity) -> KpiSnapshot {
        let buckets = self.bucket_year(orders, year);
        let bucket = match granularity {
            Granularity::Year => buckets.iter().fold(Bucket::default(), |mut acc, b| {
                acc.cargo = acc.cargo.saturating_add(b.cargo);
                acc.hull = acc.hull.saturating_add(b.hull);
                acc.orders += b.orders;
                acc.uncategorised += b.uncategorised;
                acc
            }),
            Granularity::Month(index) => buckets.get(index as usize).copied().unwrap_or_default(),
        };
        let targets = self.targets.resolve(year);
        self.snapshot(year, granularity, targets, bucket)
    }

    /// One snapshot per month of `year`, January first.
    pub fn monthly_breakdown<R: ProductionRecord>(&self, orders: &[R], year: i32) -> Vec<KpiSnapshot> {
        let buckets = self.bucket_year(orders, year);
        let targets = self.targets.resolve(year);
        buckets
            .iter()
            .enumerate()
            .map(|(index, bucket)| self.snapshot(year, Granularity::Month(index as u32), targets, *bucket))
            .collect()
    }

    fn bucket_year<R: ProductionRecord>(&self, orders: &[R], year: i32) -> [Bucket; 12] {
        let mut buckets = [Bucket::default(); 12];
        let is_live = self.live_year == Some(year);
        for order in orders {
            let produced = ProductionMonth::of(order.order_date());
            if produced.year != year {
                continue;
            }
            let slot = if is_live { 0 } else { produced.month_index as usize };
            let category = ProductCategory::classify(order.product_type());
            buckets[slot].add(category, parse_premium(order.premium()));
        }
        buckets
    }

    fn snapshot(&self, year: i32, granularity: Granularity, targets: &YearTargets, bucket: Bucket) -> KpiSnapshot {
        let (cargo_target, hull_target, month) = match granularity {
            Granularity::Year => (
                targets.category(ProductCategory::Cargo).yearly,
                targets.category(ProductCategory::Hull).yearly,
                None,
            ),
            Granularity::Month(index) => {
                let pick = |category| {
                    let target: &CategoryTarget = targets.category(category);
                    target.monthly.get(index as usize).copied().unwrap_or(Decimal::ZERO)
                };
                (pick(ProductCategory::Cargo), pick(ProductCategory::Hull), Some(index))
            }
        };
        KpiSnapshot {
            year,
            month,
            target_year: targets.year,
            live_year: self.live_year == Some(year),
            cargo: KpiFigure::new(bucket.cargo, cargo_target),
            hull: KpiFigure::new(bucket.hull, hull_target),
            total: KpiFigure::new(bucket.cargo.saturating_add(bucket.hull), cargo_target + hull_target),
            order_count: bucket.orders,
            uncategorised_count: bucket.uncategorised,
        }
    }
}
