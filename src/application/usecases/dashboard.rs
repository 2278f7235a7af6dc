use std::sync::Arc;

use anyhow::{Context, Result as AnyResult};
use chrono::{DateTime, Datelike, Months, TimeZone, Utc};
use thiserror::Error;
use tracing::info;

use crate::{
    auth::AuthenticatedUser,
    domain::{
        repositories::dashboard::DashboardRepository,
        value_objects::{
            dashboard::{
                AdminDashboardDto, AdminDashboardStats, DashboardDto, MemberDashboardDto,
                MembershipOverviewDto, TransactionOverviewDto,
            },
            enums::user_roles::Role,
            packages::PackageModel,
        },
    },
};

const RECENT_ROWS: i64 = 5;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DashboardError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    }

    pub fn client_message(&self) -> String {
        "Internal server error".to_string()
    }
}

/// Bounds of the calendar month containing `now`; revenue is summed per
/// calendar month, not a rolling 30 days.
pub fn current_month_window(now: DateTime<Utc>) -> AnyResult<(DateTime<Utc>, DateTime<Utc>)> {
    let month_start = Utc
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .context("failed to compute month start")?;
    let month_end = month_start
        .checked_add_months(Months::new(1))
        .context("failed to compute month end")?;

    Ok((month_start, month_end))
}

pub struct DashboardUseCase<D>
where
    D: DashboardRepository + Send + Sync + 'static,
{
    dashboard_repo: Arc<D>,
}

impl<D> DashboardUseCase<D>
where
    D: DashboardRepository + Send + Sync + 'static,
{
    pub fn new(dashboard_repo: Arc<D>) -> Self {
        Self { dashboard_repo }
    }

    pub async fn overview(
        &self,
        actor: &AuthenticatedUser,
    ) -> Result<DashboardDto, DashboardError> {
        match actor.role {
            Role::Admin => self.admin_overview().await,
            Role::Member => self.member_overview(actor).await,
        }
    }

    async fn admin_overview(&self) -> Result<DashboardDto, DashboardError> {
        let now = Utc::now();
        let (month_start, month_end) = current_month_window(now)?;

        let stats = AdminDashboardStats {
            total_members: self.dashboard_repo.count_members().await?,
            active_memberships: self.dashboard_repo.count_active_memberships(now).await?,
            total_packages: self.dashboard_repo.count_packages().await?,
            monthly_revenue_minor: self
                .dashboard_repo
                .sum_paid_amount_between(month_start, month_end)
                .await?,
        };

        let recent_transactions = self
            .dashboard_repo
            .recent_transactions(RECENT_ROWS)
            .await?
            .into_iter()
            .map(TransactionOverviewDto::from)
            .collect();

        let recent_memberships = self
            .dashboard_repo
            .recent_memberships(RECENT_ROWS)
            .await?
            .into_iter()
            .map(|overview| MembershipOverviewDto::from_overview(overview, now))
            .collect();

        info!(
            total_members = stats.total_members,
            active_memberships = stats.active_memberships,
            "dashboard: admin overview composed"
        );

        Ok(DashboardDto::Admin(AdminDashboardDto {
            stats,
            recent_transactions,
            recent_memberships,
        }))
    }

    async fn member_overview(
        &self,
        actor: &AuthenticatedUser,
    ) -> Result<DashboardDto, DashboardError> {
        let now = Utc::now();

        // "current" is latest by start time; effective status tells the
        // member whether it is still inside its window
        let current_membership = self
            .dashboard_repo
            .latest_membership_for_user(actor.user_id)
            .await?
            .map(|overview| MembershipOverviewDto::from_overview(overview, now));

        let membership_history = self
            .dashboard_repo
            .recent_memberships_for_user(actor.user_id, RECENT_ROWS)
            .await?
            .into_iter()
            .map(|overview| MembershipOverviewDto::from_overview(overview, now))
            .collect();

        let transaction_history = self
            .dashboard_repo
            .recent_transactions_for_user(actor.user_id, RECENT_ROWS)
            .await?
            .into_iter()
            .map(TransactionOverviewDto::from)
            .collect();

        let available_packages = self
            .dashboard_repo
            .list_active_packages()
            .await?
            .into_iter()
            .map(PackageModel::from)
            .collect();

        Ok(DashboardDto::Member(MemberDashboardDto {
            current_membership,
            membership_history,
            transaction_history,
            available_packages,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::memberships::MembershipEntity,
        repositories::dashboard::MockDashboardRepository,
        value_objects::dashboard::MembershipOverview,
        value_objects::enums::membership_statuses::MembershipStatus,
    };
    use chrono::Duration;
    use uuid::Uuid;

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
            email: None,
        }
    }

    fn member(user_id: Uuid) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id,
            role: Role::Member,
            email: None,
        }
    }

    fn expired_overview(user_id: Uuid) -> MembershipOverview {
        let now = Utc::now();
        MembershipOverview {
            membership: MembershipEntity {
                id: 1,
                user_id,
                subscription_package_id: 10,
                started_at: now - Duration::days(60),
                expires_at: now - Duration::days(30),
                status: MembershipStatus::Active.to_string(),
                created_at: now - Duration::days(60),
                updated_at: now - Duration::days(60),
            },
            package_name: "Basic".to_string(),
            user_email: "member@example.com".to_string(),
        }
    }

    #[test]
    fn month_window_spans_one_calendar_month() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 13, 45, 0).unwrap();
        let (start, end) = current_month_window(now).unwrap();

        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn month_window_wraps_december() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let (start, end) = current_month_window(now).unwrap();

        assert_eq!(start, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn admin_overview_composes_counts_and_recents() {
        let mut dashboard_repo = MockDashboardRepository::new();
        dashboard_repo
            .expect_count_members()
            .returning(|| Box::pin(async { Ok(12) }));
        dashboard_repo
            .expect_count_active_memberships()
            .returning(|_| Box::pin(async { Ok(4) }));
        dashboard_repo
            .expect_count_packages()
            .returning(|| Box::pin(async { Ok(3) }));
        dashboard_repo
            .expect_sum_paid_amount_between()
            .withf(|start, end| {
                start.day() == 1 && end > start
            })
            .returning(|_, _| Box::pin(async { Ok(198000) }));
        dashboard_repo
            .expect_recent_transactions()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        dashboard_repo
            .expect_recent_memberships()
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        let usecase = DashboardUseCase::new(Arc::new(dashboard_repo));
        let DashboardDto::Admin(dto) = usecase.overview(&admin()).await.unwrap() else {
            panic!("admin actor should get the admin dashboard");
        };

        assert_eq!(dto.stats.total_members, 12);
        assert_eq!(dto.stats.active_memberships, 4);
        assert_eq!(dto.stats.total_packages, 3);
        assert_eq!(dto.stats.monthly_revenue_minor, 198000);
    }

    #[tokio::test]
    async fn member_overview_surfaces_lapsed_current_membership_as_expired() {
        let user_id = Uuid::new_v4();

        let mut dashboard_repo = MockDashboardRepository::new();
        dashboard_repo
            .expect_latest_membership_for_user()
            .returning(move |_| Box::pin(async move { Ok(Some(expired_overview(user_id))) }));
        dashboard_repo
            .expect_recent_memberships_for_user()
            .returning(|_, _| Box::pin(async { Ok(vec![]) }));
        dashboard_repo
            .expect_recent_transactions_for_user()
            .returning(|_, _| Box::pin(async { Ok(vec![]) }));
        dashboard_repo
            .expect_list_active_packages()
            .returning(|| Box::pin(async { Ok(vec![]) }));

        let usecase = DashboardUseCase::new(Arc::new(dashboard_repo));
        let DashboardDto::Member(dto) = usecase.overview(&member(user_id)).await.unwrap() else {
            panic!("member actor should get the member dashboard");
        };

        let current = dto.current_membership.expect("latest membership is current");
        assert_eq!(current.status, MembershipStatus::Expired);
        assert!(dto.available_packages.is_empty());
    }
}
