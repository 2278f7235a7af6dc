use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::memberships;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = memberships)]
pub struct MembershipEntity {
    pub id: i64,
    pub user_id: Uuid,
    pub subscription_package_id: i64,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = memberships)]
pub struct InsertMembershipEntity {
    pub user_id: Uuid,
    pub subscription_package_id: i64,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
