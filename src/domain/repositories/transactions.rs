use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::transactions::{InsertTransactionEntity, TransactionEntity},
    value_objects::enums::transaction_statuses::TransactionStatus,
};

#[async_trait]
#[automock]
pub trait TransactionRepository {
    async fn create(
        &self,
        insert_transaction_entity: InsertTransactionEntity,
    ) -> Result<TransactionEntity>;
    async fn find_by_id(&self, transaction_id: i64) -> Result<Option<TransactionEntity>>;
    async fn find_by_order_id(&self, order_id: String) -> Result<Option<TransactionEntity>>;
    /// Conditional transition: only fires while the row is still pending.
    /// Returns the updated row, or None when another callback already won.
    async fn mark_paid_if_pending(
        &self,
        order_id: String,
        paid_at: DateTime<Utc>,
        payment_method: Option<String>,
        gateway_response: serde_json::Value,
    ) -> Result<Option<TransactionEntity>>;
    /// Same pending-only guard for the non-paid outcomes.
    async fn mark_status_if_pending(
        &self,
        order_id: String,
        status: TransactionStatus,
        gateway_response: serde_json::Value,
    ) -> Result<Option<TransactionEntity>>;
    async fn attach_membership(&self, transaction_id: i64, membership_id: i64) -> Result<()>;
    async fn list_all(&self) -> Result<Vec<TransactionEntity>>;
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<TransactionEntity>>;
}
