use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::dto::dashboard_dto::{DashboardSummary, OrderCounts, ProductPremium, QuotationCounts};
use crate::kpi::aggregator::parse_premium;
use crate::model::common::{BusinessType, QuotationStatus};
use crate::model::department::Department;
use crate::model::filter::{OrderFilter, QuotationFilter};
use crate::model::order::Order;
use crate::model::quotation::Quotation;
use crate::repository::order_repo::OrderRepository;
use crate::repository::quotation_repo::QuotationRepository;
use crate::util::error::ServiceError;

#[async_trait]
pub trait DashboardService: Send + Sync {
    async fn summary(&self, department: Department) -> Result<DashboardSummary, ServiceError>;
}

pub struct DashboardServiceImpl {
    pub quotation_repo: Arc<dyn QuotationRepository>,
    pub order_repo: Arc<dyn OrderRepository>,
}

impl DashboardServiceImpl {
    pub fn new(quotation_repo: Arc<dyn QuotationRepository>, order_repo: Arc<dyn OrderRepository>) -> Self {
        DashboardServiceImpl { quotation_repo, order_repo }
    }
}

pub fn summarize(department: Department, quotations: &[Quotation], orders: &[Order]) -> DashboardSummary {
    let mut quotation_counts = QuotationCounts { total: quotations.len(), ..Default::default() };
    for q in quotations {
        match q.status {
            QuotationStatus::Open => quotation_counts.open += 1,
            QuotationStatus::Confirmed => quotation_counts.confirmed += 1,
            QuotationStatus::Decline => quotation_counts.declined += 1,
        }
    }
    let confirmation_rate = if quotation_counts.total == 0 {
        None
    } else {
        let rate = Decimal::from(quotation_counts.confirmed as u64) / Decimal::from(quotation_counts.total as u64)
            * Decimal::ONE_HUNDRED;
        Some(rate.round_dp(2))
    };

    let mut order_counts = OrderCounts { total: orders.len(), ..Default::default() };
    let mut by_product: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();
    let mut total_premium = Decimal::ZERO;
    for o in orders {
        match o.business_type {
            BusinessType::NewBusiness => order_counts.new_business += 1,
            BusinessType::Renewal => order_counts.renewal += 1,
        }
        if o.is_closed_policy() {
            order_counts.closed_policies += 1;
        }
        let premium = parse_premium(&o.premium);
        total_premium = total_premium.saturating_add(premium);
        let entry = by_product.entry(o.product_type.as_str()).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 = entry.1.saturating_add(premium);
    }

    DashboardSummary {
        department,
        department_name: department.display_name().to_string(),
        quotations: quotation_counts,
        confirmation_rate,
        orders: order_counts,
        total_premium,
        premium_by_product: by_product
            .into_iter()
            .map(|(product_type, (order_count, premium))| ProductPremium {
                product_type: product_type.to_string(),
                order_count,
                premium,
            })
            .collect(),
    }
}

#[async_trait]
impl DashboardService for DashboardServiceImpl {
    #[instrument(skip(self), fields(department = %department))]
    async fn summary(&self, department: Department) -> Result<DashboardSummary, ServiceError> {
        let quotations = self.quotation_repo.list_all(department, &QuotationFilter::default()).await?;
        let orders = self.order_repo.list_all(department, &OrderFilter::default()).await?;
        info!(quotations = quotations.len(), orders = orders.len(), "Building dashboard summary");
        Ok(summarize(department, &quotations, &orders))
    }
}
