use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infrastructure::postgres::schema::subscription_packages;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = subscription_packages)]
pub struct PackageEntity {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub duration_months: i32,
    pub price_minor: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscription_packages)]
pub struct InsertPackageEntity {
    pub name: String,
    pub description: String,
    pub duration_months: i32,
    pub price_minor: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = subscription_packages)]
pub struct EditPackageEntity {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_months: Option<i32>,
    pub price_minor: Option<i32>,
    pub is_active: Option<bool>,
    pub updated_at: DateTime<Utc>,
}
