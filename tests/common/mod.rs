#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::{to_bytes, Body}, http::{Request, StatusCode}, Router};
use bson::oid::ObjectId;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use underwriting_backend::app::app::{build_router, Services};
use underwriting_backend::config::kpi_conf::KpiConfig;
use underwriting_backend::model::common::{PolicyStatus, QuotationStatus};
use underwriting_backend::model::department::Department;
use underwriting_backend::model::filter::{OrderFilter, QuotationFilter};
use underwriting_backend::model::order::Order;
use underwriting_backend::model::quotation::Quotation;
use underwriting_backend::repository::order_repo::OrderRepository;
use underwriting_backend::repository::quotation_repo::QuotationRepository;
use underwriting_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use underwriting_backend::util::analysis::{AnalysisClient, AnalysisRequest};
use underwriting_backend::util::error::ServiceError;

/// Quotation store backed by a vector, filtered through `QuotationFilter::matches`.
#[derive(Default)]
pub struct InMemoryQuotationRepository {
    rows: Mutex<Vec<Quotation>>,
}

#[async_trait]
impl QuotationRepository for InMemoryQuotationRepository {
    async fn create(&self, department: Department, quotation: Quotation) -> RepositoryResult<Quotation> {
        let mut quotation = quotation;
        quotation.id = Some(ObjectId::new());
        quotation.department = department;
        let now = chrono::Utc::now().to_rfc3339();
        quotation.created_at = Some(now.clone());
        quotation.updated_at = Some(now);
        self.rows.lock().unwrap().push(quotation.clone());
        Ok(quotation)
    }

    async fn get_by_id(&self, department: Department, id: ObjectId) -> RepositoryResult<Quotation> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.department == department && q.id == Some(id))
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("Quotation not found for ID: {}", id)))
    }

    async fn update(&self, department: Department, id: ObjectId, quotation: Quotation) -> RepositoryResult<Quotation> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|q| q.department == department && q.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No quotation found to update for ID: {}", id)))?;
        let created_at = slot.created_at.clone();
        *slot = Quotation {
            id: Some(id),
            department,
            created_at,
            updated_at: Some(chrono::Utc::now().to_rfc3339()),
            ..quotation
        };
        Ok(slot.clone())
    }

    async fn update_status(
        &self,
        department: Department,
        id: ObjectId,
        status: QuotationStatus,
        decline_reason: Option<String>,
    ) -> RepositoryResult<Quotation> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|q| q.department == department && q.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No quotation found to update for ID: {}", id)))?;
        slot.status = status;
        slot.decline_reason = decline_reason;
        Ok(slot.clone())
    }

    async fn delete(&self, department: Department, id: ObjectId) -> RepositoryResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|q| !(q.department == department && q.id == Some(id)));
        if rows.len() == before {
            return Err(RepositoryError::not_found(format!("No quotation found to delete for ID: {}", id)));
        }
        Ok(())
    }

    async fn delete_many(&self, department: Department, ids: &[ObjectId]) -> RepositoryResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|q| !(q.department == department && q.id.map_or(false, |id| ids.contains(&id))));
        Ok((before - rows.len()) as u64)
    }

    async fn list(&self, department: Department, filter: &QuotationFilter, page: u32, limit: u32) -> RepositoryResult<Vec<Quotation>> {
        let mut rows = self.list_all(department, filter).await?;
        rows.reverse();
        let skip = (page.saturating_sub(1) * limit) as usize;
        Ok(rows.into_iter().skip(skip).take(limit as usize).collect())
    }

    async fn list_all(&self, department: Department, filter: &QuotationFilter) -> RepositoryResult<Vec<Quotation>> {
        let mut rows: Vec<Quotation> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.department == department && filter.matches(q))
            .cloned()
            .collect();
        rows.sort_by_key(|q| q.quotation_date);
        Ok(rows)
    }

    async fn count(&self, department: Department, filter: &QuotationFilter) -> RepositoryResult<u64> {
        Ok(self.list_all(department, filter).await?.len() as u64)
    }
}

/// Order store backed by a vector, filtered through `OrderFilter::matches`.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    rows: Mutex<Vec<Order>>,
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, department: Department, order: Order) -> RepositoryResult<Order> {
        let mut order = order;
        order.id = Some(ObjectId::new());
        order.department = department;
        let now = chrono::Utc::now().to_rfc3339();
        order.created_at = Some(now.clone());
        order.updated_at = Some(now);
        self.rows.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn get_by_id(&self, department: Department, id: ObjectId) -> RepositoryResult<Order> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.department == department && o.id == Some(id))
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("Order not found for ID: {}", id)))
    }

    async fn update(&self, department: Department, id: ObjectId, order: Order) -> RepositoryResult<Order> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|o| o.department == department && o.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No order found to update for ID: {}", id)))?;
        let created_at = slot.created_at.clone();
        *slot = Order {
            id: Some(id),
            department,
            created_at,
            updated_at: Some(chrono::Utc::now().to_rfc3339()),
            ..order
        };
        Ok(slot.clone())
    }

    async fn update_policy_status(&self, department: Department, id: ObjectId, status: PolicyStatus) -> RepositoryResult<Order> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|o| o.department == department && o.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No order found to update for ID: {}", id)))?;
        slot.policy_status = status;
        Ok(slot.clone())
    }

    async fn delete(&self, department: Department, id: ObjectId) -> RepositoryResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|o| !(o.department == department && o.id == Some(id)));
        if rows.len() == before {
            return Err(RepositoryError::not_found(format!("No order found to delete for ID: {}", id)));
        }
        Ok(())
    }

    async fn delete_many(&self, department: Department, ids: &[ObjectId]) -> RepositoryResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|o| !(o.department == department && o.id.map_or(false, |id| ids.contains(&id))));
        Ok((before - rows.len()) as u64)
    }

    async fn list(&self, department: Department, filter: &OrderFilter, page: u32, limit: u32) -> RepositoryResult<Vec<Order>> {
        let mut rows = self.list_all(department, filter).await?;
        rows.reverse();
        let skip = (page.saturating_sub(1) * limit) as usize;
        Ok(rows.into_iter().skip(skip).take(limit as usize).collect())
    }

    async fn list_all(&self, department: Department, filter: &OrderFilter) -> RepositoryResult<Vec<Order>> {
        let mut rows: Vec<Order> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.department == department && filter.matches(o))
            .cloned()
            .collect();
        rows.sort_by_key(|o| o.order_date);
        Ok(rows)
    }

    async fn count(&self, department: Department, filter: &OrderFilter) -> RepositoryResult<u64> {
        Ok(self.list_all(department, filter).await?.len() as u64)
    }
}

/// Echoes the digest size back, or reports itself unconfigured.
pub struct StubAnalysisClient {
    pub configured: bool,
}

#[async_trait]
impl AnalysisClient for StubAnalysisClient {
    async fn summarize(&self, request: &AnalysisRequest<'_>) -> Result<String, ServiceError> {
        if !self.configured {
            return Err(ServiceError::Unavailable("analysis endpoint is not configured".to_string()));
        }
        Ok(format!(
            "{} departments, total order premium {}",
            request.digest.departments.len(),
            request.digest.total_order_premium
        ))
    }
}

pub struct TestApp {
    pub router: Router,
    pub quotations: Arc<InMemoryQuotationRepository>,
    pub orders: Arc<InMemoryOrderRepository>,
}

pub fn setup_app() -> TestApp {
    setup_app_with(true)
}

pub fn setup_app_with(analysis_configured: bool) -> TestApp {
    let quotations = Arc::new(InMemoryQuotationRepository::default());
    let orders = Arc::new(InMemoryOrderRepository::default());
    let services = Services::new(
        quotations.clone(),
        orders.clone(),
        Arc::new(StubAnalysisClient { configured: analysis_configured }),
        KpiConfig::default(),
    );
    TestApp {
        router: build_router(&services),
        quotations,
        orders,
    }
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}
