use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::kpi_conf::KpiConfig;
use crate::dto::kpi_dto::MonthlyKpiResponse;
use crate::kpi::production_month::CLOSING_DAY;
use crate::kpi::{Granularity, KpiAggregator, KpiSnapshot, TargetTable};
use crate::model::department::Department;
use crate::model::filter::OrderFilter;
use crate::model::order::Order;
use crate::repository::order_repo::OrderRepository;
use crate::util::error::ServiceError;

#[async_trait]
pub trait KpiService: Send + Sync {
    async fn production_snapshot(&self, year: Option<i32>, month: Option<u32>) -> Result<KpiSnapshot, ServiceError>;
    async fn monthly_production(&self, year: Option<i32>) -> Result<MonthlyKpiResponse, ServiceError>;
}

/// Marine Cargo/Hull production against target.
pub struct KpiServiceImpl {
    pub order_repo: Arc<dyn OrderRepository>,
    pub targets: TargetTable,
    pub config: KpiConfig,
}

impl KpiServiceImpl {
    pub fn new(order_repo: Arc<dyn OrderRepository>, config: KpiConfig) -> Self {
        let targets = TargetTable::builtin(config.default_target_year);
        KpiServiceImpl { order_repo, targets, config }
    }

    fn aggregator(&self) -> KpiAggregator<'_> {
        KpiAggregator::new(&self.targets, self.config.live_year)
    }

    /// Order dates that can land in production year `year`.
    fn production_window(year: i32) -> OrderFilter {
        OrderFilter {
            from: year
                .checked_sub(1)
                .and_then(|previous| NaiveDate::from_ymd_opt(previous, 12, CLOSING_DAY + 1)),
            to: NaiveDate::from_ymd_opt(year, 12, CLOSING_DAY),
            ..Default::default()
        }
    }

    async fn marine_orders(&self, year: i32) -> Result<Vec<Order>, ServiceError> {
        let orders = self
            .order_repo
            .list_all(Department::Marine, &Self::production_window(year))
            .await?;
        info!("Loaded {} marine orders for production year {}", orders.len(), year);
        Ok(orders)
    }
}

#[async_trait]
impl KpiService for KpiServiceImpl {
    #[instrument(skip(self))]
    async fn production_snapshot(&self, year: Option<i32>, month: Option<u32>) -> Result<KpiSnapshot, ServiceError> {
        let year = year.unwrap_or_else(|| self.targets.default_year());
        let granularity = match month {
            Some(index) if index > 11 => {
                return Err(ServiceError::InvalidInput(format!("Month index must be 0-11, got {}", index)));
            }
            Some(index) => Granularity::Month(index),
            None => Granularity::Year,
        };
        let orders = self.marine_orders(year).await?;
        Ok(self.aggregator().compute(&orders, year, granularity))
    }

    #[instrument(skip(self))]
    async fn monthly_production(&self, year: Option<i32>) -> Result<MonthlyKpiResponse, ServiceError> {
        let year = year.unwrap_or_else(|| self.targets.default_year());
        let orders = self.marine_orders(year).await?;
        let months = self.aggregator().monthly_breakdown(&orders, year);
        Ok(MonthlyKpiResponse {
            year,
            target_year: self.targets.resolve(year).year,
            known_target_years: self.targets.known_years(),
            months,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_window_covers_closing_rule() {
        let window = KpiServiceImpl::production_window(2025);
        assert_eq!(window.from, NaiveDate::from_ymd_opt(2024, 12, 26));
        assert_eq!(window.to, NaiveDate::from_ymd_opt(2025, 12, 25));
    }

    #[test]
    fn test_production_window_at_integer_limits() {
        let lowest = KpiServiceImpl::production_window(i32::MIN);
        assert_eq!(lowest.from, None);
        assert_eq!(lowest.to, None);
        let highest = KpiServiceImpl::production_window(i32::MAX);
        assert_eq!(highest.from, None);
    }
}
