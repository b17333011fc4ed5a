use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::dto::common_dto::{Page, Paging};
use crate::dto::order_dto::{ConvertQuotationRequest, CreateOrderRequest};
use crate::model::common::{PolicyStatus, QuotationStatus};
use crate::model::department::Department;
use crate::model::filter::OrderFilter;
use crate::model::order::Order;
use crate::repository::order_repo::OrderRepository;
use crate::repository::quotation_repo::QuotationRepository;
use crate::util::error::ServiceError;

#[async_trait]
pub trait OrderService: Send + Sync {
    async fn create_order(&self, department: Department, order: Order) -> Result<Order, ServiceError>;
    async fn get_order(&self, department: Department, id: ObjectId) -> Result<Order, ServiceError>;
    async fn update_order(
        &self,
        department: Department,
        id: ObjectId,
        changes: CreateOrderRequest,
        quotation_id: Option<ObjectId>,
    ) -> Result<Order, ServiceError>;
    async fn update_policy_status(&self, department: Department, id: ObjectId, status: PolicyStatus) -> Result<Order, ServiceError>;
    async fn delete_order(&self, department: Department, id: ObjectId) -> Result<(), ServiceError>;
    async fn delete_orders(&self, department: Department, ids: Vec<ObjectId>) -> Result<u64, ServiceError>;
    async fn list_orders(&self, department: Department, filter: OrderFilter, paging: Paging) -> Result<Page<Order>, ServiceError>;
    async fn convert_quotation(
        &self,
        department: Department,
        quotation_id: ObjectId,
        request: ConvertQuotationRequest,
    ) -> Result<Order, ServiceError>;
}

pub struct OrderServiceImpl {
    pub order_repo: Arc<dyn OrderRepository>,
    pub quotation_repo: Arc<dyn QuotationRepository>,
}

impl OrderServiceImpl {
    pub fn new(order_repo: Arc<dyn OrderRepository>, quotation_repo: Arc<dyn QuotationRepository>) -> Self {
        OrderServiceImpl { order_repo, quotation_repo }
    }
}

#[async_trait]
impl OrderService for OrderServiceImpl {
    #[instrument(skip(self, order), fields(department = %department))]
    async fn create_order(&self, department: Department, order: Order) -> Result<Order, ServiceError> {
        info!("Creating order");
        let res = self.order_repo.create(department, order).await;
        match &res {
            Ok(o) => info!(id = ?o.id, "Order created successfully"),
            Err(e) => error!("Failed to create order: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(department = %department, id = %id))]
    async fn get_order(&self, department: Department, id: ObjectId) -> Result<Order, ServiceError> {
        self.order_repo.get_by_id(department, id).await.map_err(|e| {
            error!("Failed to fetch order: {e}");
            ServiceError::from(e)
        })
    }

    #[instrument(skip(self, changes), fields(department = %department, id = %id))]
    async fn update_order(
        &self,
        department: Department,
        id: ObjectId,
        changes: CreateOrderRequest,
        quotation_id: Option<ObjectId>,
    ) -> Result<Order, ServiceError> {
        info!("Updating order");
        let existing = self.order_repo.get_by_id(department, id).await?;
        let order = changes.apply_to(existing, quotation_id);
        let res = self.order_repo.update(department, id, order).await;
        match &res {
            Ok(_) => info!("Order updated successfully"),
            Err(e) => error!("Failed to update order: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(department = %department, id = %id, status = status.as_str()))]
    async fn update_policy_status(&self, department: Department, id: ObjectId, status: PolicyStatus) -> Result<Order, ServiceError> {
        info!("Updating policy status");
        let res = self.order_repo.update_policy_status(department, id, status).await;
        match &res {
            Ok(_) => info!("Policy status updated successfully"),
            Err(e) => error!("Failed to update policy status: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(department = %department, id = %id))]
    async fn delete_order(&self, department: Department, id: ObjectId) -> Result<(), ServiceError> {
        info!("Deleting order");
        let res = self.order_repo.delete(department, id).await;
        if let Err(e) = &res {
            error!("Failed to delete order: {e}");
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self, ids), fields(department = %department, requested = ids.len()))]
    async fn delete_orders(&self, department: Department, ids: Vec<ObjectId>) -> Result<u64, ServiceError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let res = self.order_repo.delete_many(department, &ids).await;
        match &res {
            Ok(deleted) => info!("Bulk deleted {} orders", deleted),
            Err(e) => error!("Failed to bulk delete orders: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(department = %department, page = paging.page, limit = paging.limit))]
    async fn list_orders(&self, department: Department, filter: OrderFilter, paging: Paging) -> Result<Page<Order>, ServiceError> {
        let items = self.order_repo.list(department, &filter, paging.page, paging.limit).await?;
        let total = self.order_repo.count(department, &filter).await?;
        info!("Fetched {} of {} orders", items.len(), total);
        Ok(Page {
            items,
            total,
            page: paging.page,
            limit: paging.limit,
        })
    }

    /// Two independent writes: nothing links the order back if the caller
    /// later edits or deletes the quotation.
    #[instrument(skip(self, request), fields(department = %department, quotation_id = %quotation_id))]
    async fn convert_quotation(
        &self,
        department: Department,
        quotation_id: ObjectId,
        request: ConvertQuotationRequest,
    ) -> Result<Order, ServiceError> {
        info!("Converting quotation to order");
        let quotation = self.quotation_repo.get_by_id(department, quotation_id).await?;
        if quotation.status != QuotationStatus::Confirmed {
            warn!(status = quotation.status.as_str(), "Refusing to convert unconfirmed quotation");
            return Err(ServiceError::InvalidInput(format!(
                "Only confirmed quotations can be converted (status is {})",
                quotation.status.as_str()
            )));
        }

        let premium = request
            .premium
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or(quotation.estimated_premium);
        let order = Order {
            id: None,
            department,
            quotation_id: Some(quotation_id),
            broker: quotation.broker,
            insured: quotation.insured,
            product_type: quotation.product_type,
            premium,
            currency: quotation.currency,
            business_type: request.business_type,
            order_date: request.order_date.unwrap_or_else(|| Utc::now().date_naive()),
            requires_satisfactory_survey: request.requires_satisfactory_survey,
            policy_status: PolicyStatus::Pending,
            notes: quotation.notes,
            created_at: None,
            updated_at: None,
        };
        let res = self.order_repo.create(department, order).await;
        match &res {
            Ok(o) => info!(order_id = ?o.id, "Quotation converted to order"),
            Err(e) => error!("Failed to convert quotation: {e}"),
        }
        res.map_err(ServiceError::from)
    }
}
