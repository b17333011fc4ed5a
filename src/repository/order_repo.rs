use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};
use tracing::{error, info};

use crate::model::common::PolicyStatus;
use crate::model::department::Department;
use crate::model::filter::OrderFilter;
use crate::model::order::Order;
use crate::repository::mongo_client::skip_for;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, department: Department, order: Order) -> RepositoryResult<Order>;
    async fn get_by_id(&self, department: Department, id: ObjectId) -> RepositoryResult<Order>;
    async fn update(&self, department: Department, id: ObjectId, order: Order) -> RepositoryResult<Order>;
    async fn update_policy_status(&self, department: Department, id: ObjectId, status: PolicyStatus) -> RepositoryResult<Order>;
    async fn delete(&self, department: Department, id: ObjectId) -> RepositoryResult<()>;
    async fn delete_many(&self, department: Department, ids: &[ObjectId]) -> RepositoryResult<u64>;
    async fn list(&self, department: Department, filter: &OrderFilter, page: u32, limit: u32) -> RepositoryResult<Vec<Order>>;
    async fn list_all(&self, department: Department, filter: &OrderFilter) -> RepositoryResult<Vec<Order>>;
    async fn count(&self, department: Department, filter: &OrderFilter) -> RepositoryResult<u64>;
}

pub struct MongoOrderRepository {
    db: Database,
    collection_prefix: String,
}

impl MongoOrderRepository {
    pub fn new(db: Database, collection_prefix: impl Into<String>) -> Self {
        MongoOrderRepository {
            db,
            collection_prefix: collection_prefix.into(),
        }
    }

    fn collection(&self, department: Department) -> Collection<Order> {
        self.db.collection::<Order>(&department.order_collection(&self.collection_prefix))
    }

    async fn find(&self, department: Department, filter: Document, options: FindOptions) -> RepositoryResult<Vec<Order>> {
        let cursor = self
            .collection(department)
            .find(filter, options)
            .await
            .map_err(|e| RepositoryError::from_driver("Failed to list orders", e))?;
        cursor.try_collect().await.map_err(|e| {
            error!("Failed to deserialize order: {}", e);
            RepositoryError::serialization(format!("Failed to deserialize order: {}", e))
        })
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    #[tracing::instrument(skip(self, order), fields(department = %department))]
    async fn create(&self, department: Department, order: Order) -> RepositoryResult<Order> {
        let mut new_order = order;
        new_order.id = Some(ObjectId::new());
        new_order.department = department;
        let now = chrono::Utc::now().to_rfc3339();
        new_order.created_at = Some(now.clone());
        new_order.updated_at = Some(now);

        match self.collection(department).insert_one(&new_order, None).await {
            Ok(_) => {
                info!(id = ?new_order.id, "Order created");
                Ok(new_order)
            }
            Err(e) => {
                error!("Failed to create order: {}", e);
                Err(RepositoryError::from_driver("Failed to create order", e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(department = %department, id = %id))]
    async fn get_by_id(&self, department: Department, id: ObjectId) -> RepositoryResult<Order> {
        match self.collection(department).find_one(doc! { "_id": id }, None).await {
            Ok(Some(order)) => Ok(order),
            Ok(None) => {
                error!("Order not found for ID: {}", id);
                Err(RepositoryError::not_found(format!("Order not found for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to fetch order by ID: {}", e);
                Err(RepositoryError::from_driver("Failed to fetch order", e))
            }
        }
    }

    #[tracing::instrument(skip(self, order), fields(department = %department, id = %id))]
    async fn update(&self, department: Department, id: ObjectId, order: Order) -> RepositoryResult<Order> {
        let mut updated = order;
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
            .map_err(|e| RepositoryError::from_driver("Failed to update order", e))?;
        if result.matched_count == 0 {
            error!("No order found to update for ID: {}", id);
            return Err(RepositoryError::not_found(format!("No order found to update for ID: {}", id)));
        }
        info!("Order updated");
        self.get_by_id(department, id).await
    }

    #[tracing::instrument(skip(self), fields(department = %department, id = %id, status = status.as_str()))]
    async fn update_policy_status(&self, department: Department, id: ObjectId, status: PolicyStatus) -> RepositoryResult<Order> {
        let update = doc! {
            "$set": {
                "policyStatus": status.as_str(),
                "updatedAt": chrono::Utc::now().to_rfc3339(),
            }
        };
        let result = self
            .collection(department)
            .update_one(doc! { "_id": id }, update, None)
            .await
            .map_err(|e| RepositoryError::from_driver("Failed to update policy status", e))?;
        if result.matched_count == 0 {
            error!("No order found to update policy status for ID: {}", id);
            return Err(RepositoryError::not_found(format!("No order found to update policy status for ID: {}", id)));
        }
        info!("Order policy status updated");
        self.get_by_id(department, id).await
    }

    #[tracing::instrument(skip(self), fields(department = %department, id = %id))]
    async fn delete(&self, department: Department, id: ObjectId) -> RepositoryResult<()> {
        let result = self
            .collection(department)
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| RepositoryError::from_driver("Failed to delete order", e))?;
        if result.deleted_count == 0 {
            error!("No order found to delete for ID: {}", id);
            return Err(RepositoryError::not_found(format!("No order found to delete for ID: {}", id)));
        }
        info!("Order deleted");
        Ok(())
    }

    #[tracing::instrument(skip(self, ids), fields(department = %department, requested = ids.len()))]
    async fn delete_many(&self, department: Department, ids: &[ObjectId]) -> RepositoryResult<u64> {
        let result = self
            .collection(department)
            .delete_many(doc! { "_id": { "$in": ids.to_vec() } }, None)
            .await
            .map_err(|e| RepositoryError::from_driver("Failed to bulk delete orders", e))?;
        info!(deleted = result.deleted_count, "Orders bulk deleted");
        Ok(result.deleted_count)
    }

    #[tracing::instrument(skip(self), fields(department = %department, page = page, limit = limit))]
    async fn list(&self, department: Department, filter: &OrderFilter, page: u32, limit: u32) -> RepositoryResult<Vec<Order>> {
        let options = FindOptions::builder()
            .sort(doc! { "orderDate": -1, "_id": -1 })
            .skip(skip_for(page, limit))
            .limit(i64::from(limit))
            .build();
        let orders = self.find(department, filter.to_document(), options).await?;
        info!("Fetched {} orders", orders.len());
        Ok(orders)
    }

    #[tracing::instrument(skip(self), fields(department = %department))]
    async fn list_all(&self, department: Department, filter: &OrderFilter) -> RepositoryResult<Vec<Order>> {
        let options = FindOptions::builder().sort(doc! { "orderDate": 1 }).build();
        self.find(department, filter.to_document(), options).await
    }

    #[tracing::instrument(skip(self), fields(department = %department))]
    async fn count(&self, department: Department, filter: &OrderFilter) -> RepositoryResult<u64> {
        self.collection(department)
            .count_documents(filter.to_document(), None)
            .await
            .map_err(|e| RepositoryError::from_driver("Failed to count orders", e))
    }
}
