use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{
    entities::{memberships::MembershipEntity, transactions::TransactionEntity},
    value_objects::{
        enums::{membership_statuses::MembershipStatus, transaction_statuses::TransactionStatus},
        memberships::MembershipModel,
        packages::PackageModel,
    },
};

/// Joined read rows handed back by the dashboard repository.
#[derive(Debug, Clone)]
pub struct TransactionOverview {
    pub transaction: TransactionEntity,
    pub package_name: String,
    pub user_email: String,
}

#[derive(Debug, Clone)]
pub struct MembershipOverview {
    pub membership: MembershipEntity,
    pub package_name: String,
    pub user_email: String,
}

#[derive(Debug, Serialize)]
pub struct TransactionOverviewDto {
    pub id: i64,
    pub transaction_code: String,
    pub order_id: String,
    pub amount_minor: i32,
    pub status: TransactionStatus,
    pub package_name: String,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
}

impl From<TransactionOverview> for TransactionOverviewDto {
    fn from(value: TransactionOverview) -> Self {
        Self {
            id: value.transaction.id,
            transaction_code: value.transaction.transaction_code.clone(),
            order_id: value.transaction.order_id.clone(),
            amount_minor: value.transaction.amount_minor,
            status: TransactionStatus::try_from(value.transaction.status.as_str())
                .unwrap_or(TransactionStatus::Failed),
            package_name: value.package_name,
            user_email: value.user_email,
            created_at: value.transaction.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MembershipOverviewDto {
    pub id: i64,
    pub package_name: String,
    pub user_email: String,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: MembershipStatus,
}

impl MembershipOverviewDto {
    pub fn from_overview(value: MembershipOverview, now: DateTime<Utc>) -> Self {
        let model = MembershipModel::from(value.membership);
        Self {
            id: model.id,
            package_name: value.package_name,
            user_email: value.user_email,
            started_at: model.started_at,
            expires_at: model.expires_at,
            status: model.effective_status(now),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminDashboardStats {
    pub total_members: i64,
    pub active_memberships: i64,
    pub total_packages: i64,
    pub monthly_revenue_minor: i64,
}

#[derive(Debug, Serialize)]
pub struct AdminDashboardDto {
    pub stats: AdminDashboardStats,
    pub recent_transactions: Vec<TransactionOverviewDto>,
    pub recent_memberships: Vec<MembershipOverviewDto>,
}

#[derive(Debug, Serialize)]
pub struct MemberDashboardDto {
    pub current_membership: Option<MembershipOverviewDto>,
    pub membership_history: Vec<MembershipOverviewDto>,
    pub transaction_history: Vec<TransactionOverviewDto>,
    pub available_packages: Vec<PackageModel>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DashboardDto {
    Admin(AdminDashboardDto),
    Member(MemberDashboardDto),
}
