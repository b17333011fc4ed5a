use axum::{Router, routing::get};
use std::sync::Arc;
use tracing::info;

use crate::config::analysis_conf::AnalysisConfig;
use crate::config::app_conf::AppConfig;
use crate::config::kpi_conf::KpiConfig;
use crate::config::mongo_conf::MongoConfig;
use crate::repository::mongo_client::connect;
use crate::repository::order_repo::{MongoOrderRepository, OrderRepository};
use crate::repository::quotation_repo::{MongoQuotationRepository, QuotationRepository};
use crate::router::dashboard_router::dashboard_router;
use crate::router::kpi_router::kpi_router;
use crate::router::order_router::order_router;
use crate::router::quotation_router::quotation_router;
use crate::router::report_router::report_router;
use crate::service::dashboard_service::DashboardServiceImpl;
use crate::service::kpi_service::KpiServiceImpl;
use crate::service::order_service::OrderServiceImpl;
use crate::service::quotation_service::QuotationServiceImpl;
use crate::service::report_service::ReportServiceImpl;
use crate::util::analysis::{AnalysisClient, HttpAnalysisClient};

/// Every service the HTTP surface needs.
#[derive(Clone)]
pub struct Services {
    pub quotation_service: Arc<QuotationServiceImpl>,
    pub order_service: Arc<OrderServiceImpl>,
    pub kpi_service: Arc<KpiServiceImpl>,
    pub dashboard_service: Arc<DashboardServiceImpl>,
    pub report_service: Arc<ReportServiceImpl>,
}

impl Services {
    pub fn new(
        quotation_repo: Arc<dyn QuotationRepository>,
        order_repo: Arc<dyn OrderRepository>,
        analysis: Arc<dyn AnalysisClient>,
        kpi_config: KpiConfig,
    ) -> Self {
        Services {
            quotation_service: Arc::new(QuotationServiceImpl::new(quotation_repo.clone())),
            order_service: Arc::new(OrderServiceImpl::new(order_repo.clone(), quotation_repo.clone())),
            kpi_service: Arc::new(KpiServiceImpl::new(order_repo.clone(), kpi_config)),
            dashboard_service: Arc::new(DashboardServiceImpl::new(quotation_repo.clone(), order_repo.clone())),
            report_service: Arc::new(ReportServiceImpl::new(quotation_repo, order_repo, analysis)),
        }
    }
}

pub fn build_router(services: &Services) -> Router {
    Router::new()
        .merge(quotation_router(services.quotation_service.clone()))
        .merge(order_router(services.order_service.clone()))
        .merge(kpi_router(services.kpi_service.clone()))
        .merge(dashboard_router(services.dashboard_service.clone()))
        .merge(report_router(services.report_service.clone()))
        .route("/health", get(|| async { "OK" }))
}

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env();
        let mongo_config = MongoConfig::from_env()?;
        let kpi_config = KpiConfig::from_env()?;
        let analysis_config = AnalysisConfig::from_env()?;

        let db = connect(&mongo_config).await?;
        let prefix = mongo_config.collection_prefix.clone();
        let quotation_repo: Arc<dyn QuotationRepository> =
            Arc::new(MongoQuotationRepository::new(db.clone(), prefix.clone()));
        let order_repo: Arc<dyn OrderRepository> = Arc::new(MongoOrderRepository::new(db, prefix));
        let analysis: Arc<dyn AnalysisClient> = Arc::new(HttpAnalysisClient::new(analysis_config)?);

        let services = Services::new(quotation_repo, order_repo, analysis, kpi_config);
        let router = build_router(&services);
        Ok(App { config, router })
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.config.socket_addr()?;
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
