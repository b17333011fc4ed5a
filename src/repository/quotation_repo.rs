use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};
use tracing::{error, info};

use crate::model::common::QuotationStatus;
use crate::model::department::Department;
use crate::model::filter::QuotationFilter;
use crate::model::quotation::Quotation;
use crate::repository::mongo_client::skip_for;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait QuotationRepository: Send + Sync {
    async fn create(&self, department: Department, quotation: Quotation) -> RepositoryResult<Quotation>;
    async fn get_by_id(&self, department: Department, id: ObjectId) -> RepositoryResult<Quotation>;
    async fn update(&self, department: Department, id: ObjectId, quotation: Quotation) -> RepositoryResult<Quotation>;
    async fn update_status(
        &self,
        department: Department,
        id: ObjectId,
        status: QuotationStatus,
        decline_reason: Option<String>,
    ) -> RepositoryResult<Quotation>;
    async fn delete(&self, department: Department, id: ObjectId) -> RepositoryResult<()>;
    async fn delete_many(&self, department: Department, ids: &[ObjectId]) -> RepositoryResult<u64>;
    async fn list(&self, department: Department, filter: &QuotationFilter, page: u32, limit: u32) -> RepositoryResult<Vec<Quotation>>;
    async fn list_all(&self, department: Department, filter: &QuotationFilter) -> RepositoryResult<Vec<Quotation>>;
    async fn count(&self, department: Department, filter: &QuotationFilter) -> RepositoryResult<u64>;
}

pub struct MongoQuotationRepository {
    db: Database,
    collection_prefix: String,
}

impl MongoQuotationRepository {
    pub fn new(db: Database, collection_prefix: impl Into<String>) -> Self {
        MongoQuotationRepository {
            db,
            collection_prefix: collection_prefix.into(),
        }
    }

    fn collection(&self, department: Department) -> Collection<Quotation> {
        self.db.collection::<Quotation>(&department.quotation_collection(&self.collection_prefix))
    }

    async fn find(&self, department: Department, filter: Document, options: FindOptions) -> RepositoryResult<Vec<Quotation>> {
        let cursor = self
            .collection(department)
            .find(filter, options)
            .await
            .map_err(|e| RepositoryError::from_driver("Failed to list quotations", e))?;
        cursor.try_collect().await.map_err(|e| {
            error!("Failed to deserialize quotation: {}", e);
            RepositoryError::serialization(format!("Failed to deserialize quotation: {}", e))
        })
    }
}

#[async_trait]
impl QuotationRepository for MongoQuotationRepository {
    #[tracing::instrument(skip(self, quotation), fields(department = %department))]
    async fn create(&self, department: Department, quotation: Quotation) -> RepositoryResult<Quotation> {
        let mut new_quotation = quotation;
        new_quotation.id = Some(ObjectId::new());
        new_quotation.department = department;
        let now = chrono::Utc::now().to_rfc3339();
        new_quotation.created_at = Some(now.clone());
        new_quotation.updated_at = Some(now);

        match self.collection(department).insert_one(&new_quotation, None).await {
            Ok(_) => {
                info!(id = ?new_quotation.id, "Quotation created");
                Ok(new_quotation)
            }
            Err(e) => {
                error!("Failed to create quotation: {}", e);
                Err(RepositoryError::from_driver("Failed to create quotation", e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(department = %department, id = %id))]
    async fn get_by_id(&self, department: Department, id: ObjectId) -> RepositoryResult<Quotation> {
        match self.collection(department).find_one(doc! { "_id": id }, None).await {
            Ok(Some(quotation)) => Ok(quotation),
            Ok(None) => {
                error!("Quotation not found for ID: {}", id);
                Err(RepositoryError::not_found(format!("Quotation not found for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to fetch quotation by ID: {}", e);
                Err(RepositoryError::from_driver("Failed to fetch quotation", e))
            }
        }
    }

    #[tracing::instrument(skip(self, quotation), fields(department = %department, id = %id))]
    async fn update(&self, department: Department, id: ObjectId, quotation: Quotation) -> RepositoryResult<Quotation> {
        let mut updated = quotation;
        updated.id = Some(id);
        updated.department = department;
        updated.updated_at = Some(chrono::Utc::now().to_rfc3339());

        let mut set = bson::to_document(&updated)?;
        set.remove("_id");
        set.remove("createdAt");
        let result = self
            .collection(department)
            .update_one(doc! { "_id": id }, doc! { "$set": set }, None)
            .await
            .map_err(|e| RepositoryError::from_driver("Failed to update quotation", e))?;
        if result.matched_count == 0 {
            error!("No quotation found to update for ID: {}", id);
            return Err(RepositoryError::not_found(format!("No quotation found to update for ID: {}", id)));
        }
        info!("Quotation updated");
        self.get_by_id(department, id).await
    }

    #[tracing::instrument(skip(self), fields(department = %department, id = %id, status = status.as_str()))]
    async fn update_status(
        &self,
        department: Department,
        id: ObjectId,
        status: QuotationStatus,
        decline_reason: Option<String>,
    ) -> RepositoryResult<Quotation> {
        let update = doc! {
            "$set": {
                "status": status.as_str(),
                "declineReason": decline_reason,
                "updatedAt": chrono::Utc::now().to_rfc3339(),
            }
        };
        let result = self
            .collection(department)
            .update_one(doc! { "_id": id }, update, None)
            .await
            .map_err(|e| RepositoryError::from_driver("Failed to update quotation status", e))?;
        if result.matched_count == 0 {
            error!("No quotation found to update status for ID: {}", id);
            return Err(RepositoryError::not_found(format!("No quotation found to update status for ID: {}", id)));
        }
        info!("Quotation status updated");
        self.get_by_id(department, id).await
    }

    #[tracing::instrument(skip(self), fields(department = %department, id = %id))]
    async fn delete(&self, department: Department, id: ObjectId) -> RepositoryResult<()> {
        let result = self
            .collection(department)
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| RepositoryError::from_driver("Failed to delete quotation", e))?;
        if result.deleted_count == 0 {
            error!("No quotation found to delete for ID: {}", id);
            return Err(RepositoryError::not_found(format!("No quotation found to delete for ID: {}", id)));
        }
        info!("Quotation deleted");
        Ok(())
    }

    #[tracing::instrument(skip(self, ids), fields(department = %department, requested = ids.len()))]
    async fn delete_many(&self, department: Department, ids: &[ObjectId]) -> RepositoryResult<u64> {
        let result = self
            .collection(department)
            .delete_many(doc! { "_id": { "$in": ids.to_vec() } }, None)
            .await
            .map_err(|e| RepositoryError::from_driver("Failed to bulk delete quotations", e))?;
        info!(deleted = result.deleted_count, "Quotations bulk deleted");
        Ok(result.deleted_count)
    }

    #[tracing::instrument(skip(self), fields(department = %department, page = page, limit = limit))]
    async fn list(&self, department: Department, filter: &QuotationFilter, page: u32, limit: u32) -> RepositoryResult<Vec<Quotation>> {
        let options = FindOptions::builder()
            .sort(doc! { "quotationDate": -1, "_id": -1 })
            .skip(skip_for(page, limit))
            .limit(i64::from(limit))
            .build();
        let quotations = self.find(department, filter.to_document(), options).await?;
        info!("Fetched {} quotations", quotations.len());
        Ok(quotations)
    }

    #[tracing::instrument(skip(self), fields(department = %department))]
    async fn list_all(&self, department: Department, filter: &QuotationFilter) -> RepositoryResult<Vec<Quotation>> {
        let options = FindOptions::builder().sort(doc! { "quotationDate": 1 }).build();
        self.find(department, filter.to_document(), options).await
    }

    #[tracing::instrument(skip(self), fields(department = %department))]
    async fn count(&self, department: Department, filter: &QuotationFilter) -> RepositoryResult<u64> {
        self.collection(department)
            .count_documents(filter.to_document(), None)
            .await
            .map_err(|e| RepositoryError::from_driver("Failed to count quotations", e))
    }
}
