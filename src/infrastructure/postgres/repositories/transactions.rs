use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::{
    domain::{
        entities::transactions::{InsertTransactionEntity, TransactionEntity},
        repositories::transactions::TransactionRepository,
        value_objects::enums::transaction_statuses::TransactionStatus,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::transactions},
};

pub struct TransactionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl TransactionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl TransactionRepository for TransactionPostgres {
    async fn create(
        &self,
        insert_transaction_entity: InsertTransactionEntity,
    ) -> Result<TransactionEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(transactions::table)
            .values(&insert_transaction_entity)
            .returning(TransactionEntity::as_returning())
            .get_result::<TransactionEntity>(&mut conn)?;

        Ok(result)
    }

    async fn find_by_id(&self, transaction_id: i64) -> Result<Option<TransactionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = transactions::table
            .filter(transactions::id.eq(transaction_id))
            .select(TransactionEntity::as_select())
            .first::<TransactionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_order_id(&self, order_id: String) -> Result<Option<TransactionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = transactions::table
            .filter(transactions::order_id.eq(order_id))
            .select(TransactionEntity::as_select())
            .first::<TransactionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    // The pending-only filter makes the transition conditional: of two racing
    // callbacks for one order id, exactly one row update wins.
    async fn mark_paid_if_pending(
        &self,
        order_id: String,
        paid_at: DateTime<Utc>,
        payment_method: Option<String>,
        gateway_response: serde_json::Value,
    ) -> Result<Option<TransactionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(transactions::table)
            .filter(transactions::order_id.eq(order_id))
            .filter(transactions::status.eq(TransactionStatus::Pending.to_string()))
            .set((
                transactions::status.eq(TransactionStatus::Paid.to_string()),
                transactions::paid_at.eq(Some(paid_at)),
                transactions::payment_method.eq(payment_method),
                transactions::gateway_response.eq(Some(gateway_response)),
                transactions::updated_at.eq(Utc::now()),
            ))
            .returning(TransactionEntity::as_returning())
            .get_result::<TransactionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn mark_status_if_pending(
        &self,
        order_id: String,
        status: TransactionStatus,
        gateway_response: serde_json::Value,
    ) -> Result<Option<TransactionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(transactions::table)
            .filter(transactions::order_id.eq(order_id))
            .filter(transactions::status.eq(TransactionStatus::Pending.to_string()))
            .set((
                transactions::status.eq(status.to_string()),
                transactions::gateway_response.eq(Some(gateway_response)),
                transactions::updated_at.eq(Utc::now()),
            ))
            .returning(TransactionEntity::as_returning())
            .get_result::<TransactionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn attach_membership(&self, transaction_id: i64, membership_id: i64) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(transactions::table)
            .filter(transactions::id.eq(transaction_id))
            .set((
                transactions::membership_id.eq(Some(membership_id)),
                transactions::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<TransactionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = transactions::table
            .select(TransactionEntity::as_select())
            .order(transactions::created_at.desc())
            .load::<TransactionEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<TransactionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .select(TransactionEntity::as_select())
            .order(transactions::created_at.desc())
            .load::<TransactionEntity>(&mut conn)?;

        Ok(results)
    }
}
