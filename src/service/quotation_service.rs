use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::dto::common_dto::{Page, Paging};
use crate::dto::quotation_dto::CreateQuotationRequest;
use crate::model::common::QuotationStatus;
use crate::model::department::Department;
use crate::model::filter::QuotationFilter;
use crate::model::quotation::Quotation;
use crate::repository::quotation_repo::QuotationRepository;
use crate::util::error::ServiceError;

#[async_trait]
pub trait QuotationService: Send + Sync {
    async fn create_quotation(&self, department: Department, quotation: Quotation) -> Result<Quotation, ServiceError>;
    async fn get_quotation(&self, department: Department, id: ObjectId) -> Result<Quotation, ServiceError>;
    async fn update_quotation(&self, department: Department, id: ObjectId, changes: CreateQuotationRequest) -> Result<Quotation, ServiceError>;
    async fn update_quotation_status(
        &self,
        department: Department,
        id: ObjectId,
        status: QuotationStatus,
        decline_reason: Option<String>,
    ) -> Result<Quotation, ServiceError>;
    async fn delete_quotation(&self, department: Department, id: ObjectId) -> Result<(), ServiceError>;
    async fn delete_quotations(&self, department: Department, ids: Vec<ObjectId>) -> Result<u64, ServiceError>;
    async fn list_quotations(&self, department: Department, filter: QuotationFilter, paging: Paging) -> Result<Page<Quotation>, ServiceError>;
}

pub struct QuotationServiceImpl {
    pub quotation_repo: Arc<dyn QuotationRepository>,
}

impl QuotationServiceImpl {
    pub fn new(quotation_repo: Arc<dyn QuotationRepository>) -> Self {
        QuotationServiceImpl { quotation_repo }
    }
}

#[async_trait]
impl QuotationService for QuotationServiceImpl {
    #[instrument(skip(self, quotation), fields(department = %department))]
    async fn create_quotation(&self, department: Department, quotation: Quotation) -> Result<Quotation, ServiceError> {
        info!("Creating quotation");
        let res = self.quotation_repo.create(department, quotation).await;
        match &res {
            Ok(q) => info!(id = ?q.id, "Quotation created successfully"),
            Err(e) => error!("Failed to create quotation: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(department = %department, id = %id))]
    async fn get_quotation(&self, department: Department, id: ObjectId) -> Result<Quotation, ServiceError> {
        self.quotation_repo.get_by_id(department, id).await.map_err(|e| {
            error!("Failed to fetch quotation: {e}");
            ServiceError::from(e)
        })
    }

    #[instrument(skip(self, changes), fields(department = %department, id = %id))]
    async fn update_quotation(&self, department: Department, id: ObjectId, changes: CreateQuotationRequest) -> Result<Quotation, ServiceError> {
        info!("Updating quotation");
        let existing = self.quotation_repo.get_by_id(department, id).await?;
        let quotation = changes.apply_to(existing);
        let res = self.quotation_repo.update(department, id, quotation).await;
        match &res {
            Ok(_) => info!("Quotation updated successfully"),
            Err(e) => error!("Failed to update quotation: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self, decline_reason), fields(department = %department, id = %id, status = status.as_str()))]
    async fn update_quotation_status(
        &self,
        department: Department,
        id: ObjectId,
        status: QuotationStatus,
        decline_reason: Option<String>,
    ) -> Result<Quotation, ServiceError> {
        info!("Updating quotation status");
        let decline_reason = match status {
            QuotationStatus::Decline => {
                let reason = decline_reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
                if reason.is_none() {
                    return Err(ServiceError::InvalidInput("A declined quotation needs a decline reason".to_string()));
                }
                reason
            }
            _ => None,
        };
        let res = self.quotation_repo.update_status(department, id, status, decline_reason).await;
        match &res {
            Ok(_) => info!("Quotation status updated successfully"),
            Err(e) => error!("Failed to update quotation status: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(department = %department, id = %id))]
    async fn delete_quotation(&self, department: Department, id: ObjectId) -> Result<(), ServiceError> {
        info!("Deleting quotation");
        let res = self.quotation_repo.delete(department, id).await;
        if let Err(e) = &res {
            error!("Failed to delete quotation: {e}");
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self, ids), fields(department = %department, requested = ids.len()))]
    async fn delete_quotations(&self, department: Department, ids: Vec<ObjectId>) -> Result<u64, ServiceError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let res = self.quotation_repo.delete_many(department, &ids).await;
        match &res {
            Ok(deleted) => info!("Bulk deleted {} quotations", deleted),
            Err(e) => error!("Failed to bulk delete quotations: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(department = %department, page = paging.page, limit = paging.limit))]
    async fn list_quotations(&self, department: Department, filter: QuotationFilter, paging: Paging) -> Result<Page<Quotation>, ServiceError> {
        let items = self.quotation_repo.list(department, &filter, paging.page, paging.limit).await?;
        let total = self.quotation_repo.count(department, &filter).await?;
        info!("Fetched {} of {} quotations", items.len(), total);
        Ok(Page {
            items,
            total,
            page: paging.page,
            limit: paging.limit,
        })
    }
}
