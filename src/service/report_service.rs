use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::dto::report_dto::{AnalysisReportRequest, AnalysisReportResponse, DepartmentDigest, ProductionDigest};
use crate::kpi::aggregator::{parse_premium, sum_premiums};
use crate::model::common::{BusinessType, QuotationStatus};
use crate::model::department::Department;
use crate::model::filter::{OrderFilter, QuotationFilter};
use crate::model::order::Order;
use crate::model::quotation::Quotation;
use crate::repository::order_repo::OrderRepository;
use crate::repository::quotation_repo::QuotationRepository;
use crate::util::analysis::{AnalysisClient, AnalysisRequest};
use crate::util::error::ServiceError;

#[async_trait]
pub trait ReportService: Send + Sync {
    async fn analysis_report(&self, request: AnalysisReportRequest) -> Result<AnalysisReportResponse, ServiceError>;
}

pub struct ReportServiceImpl {
    pub quotation_repo: Arc<dyn QuotationRepository>,
    pub order_repo: Arc<dyn OrderRepository>,
    pub analysis: Arc<dyn AnalysisClient>,
}

impl ReportServiceImpl {
    pub fn new(
        quotation_repo: Arc<dyn QuotationRepository>,
        order_repo: Arc<dyn OrderRepository>,
        analysis: Arc<dyn AnalysisClient>,
    ) -> Self {
        ReportServiceImpl { quotation_repo, order_repo, analysis }
    }
}

pub fn digest_department(department: Department, quotations: &[Quotation], orders: &[Order]) -> DepartmentDigest {
    let count_status = |status: QuotationStatus| quotations.iter().filter(|q| q.status == status).count();
    DepartmentDigest {
        department,
        department_name: department.display_name().to_string(),
        quotation_count: quotations.len(),
        confirmed_quotations: count_status(QuotationStatus::Confirmed),
        declined_quotations: count_status(QuotationStatus::Decline),
        quoted_premium: sum_premiums(quotations.iter().map(|q| parse_premium(&q.estimated_premium))),
        order_count: orders.len(),
        new_business_orders: orders.iter().filter(|o| o.business_type == BusinessType::NewBusiness).count(),
        renewal_orders: orders.iter().filter(|o| o.business_type == BusinessType::Renewal).count(),
        closed_policies: orders.iter().filter(|o| o.is_closed_policy()).count(),
        order_premium: sum_premiums(orders.iter().map(|o| parse_premium(&o.premium))),
    }
}

#[async_trait]
impl ReportService for ReportServiceImpl {
    #[instrument(skip(self, request), fields(from = %request.from, to = %request.to))]
    async fn analysis_report(&self, request: AnalysisReportRequest) -> Result<AnalysisReportResponse, ServiceError> {
        if request.from > request.to {
            return Err(ServiceError::InvalidInput("`from` must not be after `to`".to_string()));
        }
        let departments: Vec<Department> = match request.department {
            Some(department) => vec![department],
            None => Department::ALL.to_vec(),
        };
        let quotation_filter = QuotationFilter {
            from: Some(request.from),
            to: Some(request.to),
            ..Default::default()
        };
        let order_filter = OrderFilter {
            from: Some(request.from),
            to: Some(request.to),
            ..Default::default()
        };

        let mut digests = Vec::with_capacity(departments.len());
        for department in departments {
            let quotations = self.quotation_repo.list_all(department, &quotation_filter).await?;
            let orders = self.order_repo.list_all(department, &order_filter).await?;
            digests.push(digest_department(department, &quotations, &orders));
        }
        let total_order_premium = sum_premiums(digests.iter().map(|d| d.order_premium));
        let digest = ProductionDigest {
            from: request.from,
            to: request.to,
            departments: digests,
            total_order_premium,
        };

        let summary = self
            .analysis
            .summarize(&AnalysisRequest {
                from: request.from,
                to: request.to,
                instructions: request.instructions.as_deref(),
                digest: &digest,
            })
            .await
            .map_err(|e| {
                error!("Analysis failed: {e}");
                e
            })?;
        info!(chars = summary.len(), "Analysis report ready");

        Ok(AnalysisReportResponse {
            from: request.from,
            to: request.to,
            summary,
            digest,
        })
    }
}
