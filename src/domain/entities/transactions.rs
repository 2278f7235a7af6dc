use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::transactions;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = transactions)]
pub struct TransactionEntity {
    pub id: i64,
    pub user_id: Uuid,
    pub subscription_package_id: i64,
    pub membership_id: Option<i64>,
    pub transaction_code: String,
    pub order_id: String,
    pub amount_minor: i32,
    pub status: String,
    pub payment_method: Option<String>,
    pub gateway_response: Option<serde_json::Value>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = transactions)]
pub struct InsertTransactionEntity {
    pub user_id: Uuid,
    pub subscription_package_id: i64,
    pub transaction_code: String,
    pub order_id: String,
    pub amount_minor: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
