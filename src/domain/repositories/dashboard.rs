use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::packages::PackageEntity,
    value_objects::dashboard::{MembershipOverview, TransactionOverview},
};

#[async_trait]
#[automock]
pub trait DashboardRepository {
    async fn count_members(&self) -> Result<i64>;
    async fn count_active_memberships(&self, now: DateTime<Utc>) -> Result<i64>;
    async fn count_packages(&self) -> Result<i64>;
    async fn sum_paid_amount_between(
        &self,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> Result<i64>;
    async fn recent_transactions(&self, limit: i64) -> Result<Vec<TransactionOverview>>;
    async fn recent_memberships(&self, limit: i64) -> Result<Vec<MembershipOverview>>;
    async fn latest_membership_for_user(&self, user_id: Uuid)
    -> Result<Option<MembershipOverview>>;
    async fn recent_memberships_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<MembershipOverview>>;
    async fn recent_transactions_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<TransactionOverview>>;
    async fn list_active_packages(&self) -> Result<Vec<PackageEntity>>;
}
