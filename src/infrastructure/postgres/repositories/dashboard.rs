use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{RunQueryDsl, dsl::sum, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::{
            memberships::MembershipEntity, packages::PackageEntity,
            transactions::TransactionEntity,
        },
        repositories::dashboard::DashboardRepository,
        value_objects::{
            dashboard::{MembershipOverview, TransactionOverview},
            enums::{
                membership_statuses::MembershipStatus, transaction_statuses::TransactionStatus,
                user_roles::Role,
            },
        },
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{memberships, subscription_packages, transactions, users},
    },
};

pub struct DashboardPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl DashboardPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl DashboardRepository for DashboardPostgres {
    async fn count_members(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = users::table
            .filter(users::role.eq(Role::Member.to_string()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    async fn count_active_memberships(&self, now: DateTime<Utc>) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // expiry is never swept into the stored status, so the read applies it
        let count = memberships::table
            .filter(memberships::status.eq(MembershipStatus::Active.to_string()))
            .filter(memberships::expires_at.gt(now))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    async fn count_packages(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = subscription_packages::table
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    async fn sum_paid_amount_between(
        &self,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = transactions::table
            .filter(transactions::status.eq(TransactionStatus::Paid.to_string()))
            .filter(transactions::created_at.ge(period_start))
            .filter(transactions::created_at.lt(period_end))
            .select(sum(transactions::amount_minor))
            .get_result::<Option<i64>>(&mut conn)?;

        Ok(total.unwrap_or(0))
    }

    async fn recent_transactions(&self, limit: i64) -> Result<Vec<TransactionOverview>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = transactions::table
            .inner_join(users::table)
            .inner_join(subscription_packages::table)
            .select((
                TransactionEntity::as_select(),
                subscription_packages::name,
                users::email,
            ))
            .order(transactions::created_at.desc())
            .limit(limit)
            .load::<(TransactionEntity, String, String)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(transaction, package_name, user_email)| TransactionOverview {
                transaction,
                package_name,
                user_email,
            })
            .collect())
    }

    async fn recent_memberships(&self, limit: i64) -> Result<Vec<MembershipOverview>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = memberships::table
            .inner_join(users::table)
            .inner_join(subscription_packages::table)
            .select((
                MembershipEntity::as_select(),
                subscription_packages::name,
                users::email,
            ))
            .order(memberships::created_at.desc())
            .limit(limit)
            .load::<(MembershipEntity, String, String)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(membership, package_name, user_email)| MembershipOverview {
                membership,
                package_name,
                user_email,
            })
            .collect())
    }

    async fn latest_membership_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<MembershipOverview>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = memberships::table
            .inner_join(users::table)
            .inner_join(subscription_packages::table)
            .filter(memberships::user_id.eq(user_id))
            .select((
                MembershipEntity::as_select(),
                subscription_packages::name,
                users::email,
            ))
            .order(memberships::started_at.desc())
            .first::<(MembershipEntity, String, String)>(&mut conn)
            .optional()?;

        Ok(row.map(|(membership, package_name, user_email)| MembershipOverview {
            membership,
            package_name,
            user_email,
        }))
    }

    async fn recent_memberships_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<MembershipOverview>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = memberships::table
            .inner_join(users::table)
            .inner_join(subscription_packages::table)
            .filter(memberships::user_id.eq(user_id))
            .select((
                MembershipEntity::as_select(),
                subscription_packages::name,
                users::email,
            ))
            .order(memberships::created_at.desc())
            .limit(limit)
            .load::<(MembershipEntity, String, String)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(membership, package_name, user_email)| MembershipOverview {
                membership,
                package_name,
                user_email,
            })
            .collect())
    }

    async fn recent_transactions_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<TransactionOverview>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = transactions::table
            .inner_join(users::table)
            .inner_join(subscription_packages::table)
            .filter(transactions::user_id.eq(user_id))
            .select((
                TransactionEntity::as_select(),
                subscription_packages::name,
                users::email,
            ))
            .order(transactions::created_at.desc())
            .limit(limit)
            .load::<(TransactionEntity, String, String)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(transaction, package_name, user_email)| TransactionOverview {
                transaction,
                package_name,
                user_email,
            })
            .collect())
    }

    async fn list_active_packages(&self) -> Result<Vec<PackageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = subscription_packages::table
            .filter(subscription_packages::is_active.eq(true))
            .select(PackageEntity::as_select())
            .load::<PackageEntity>(&mut conn)?;

        Ok(results)
    }
}
