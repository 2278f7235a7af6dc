use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    auth::AuthenticatedUser,
    domain::{
        repositories::memberships::MembershipRepository,
        value_objects::{
            enums::membership_statuses::MembershipStatus,
            iam::{self, Capability},
            memberships::{EditMembershipModel, MembershipDto, MembershipModel},
        },
    },
};

#[derive(Debug, Error)]
pub enum MembershipError {
    #[error("Unauthorized to view this membership")]
    Forbidden,
    #[error("Membership not found")]
    NotFound,
    #[error("{0}")]
    ValidationFailed(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl MembershipError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            MembershipError::Forbidden => StatusCode::FORBIDDEN,
            MembershipError::NotFound => StatusCode::NOT_FOUND,
            MembershipError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            MembershipError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn client_message(&self) -> String {
        match self {
            MembershipError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

pub type MembershipResult<T> = std::result::Result<T, MembershipError>;

pub struct MembershipUseCase<M>
where
    M: MembershipRepository + Send + Sync + 'static,
{
    membership_repo: Arc<M>,
}

impl<M> MembershipUseCase<M>
where
    M: MembershipRepository + Send + Sync + 'static,
{
    pub fn new(membership_repo: Arc<M>) -> Self {
        Self { membership_repo }
    }

    /// Admins see every membership; members only their own rows.
    pub async fn list(&self, actor: &AuthenticatedUser) -> MembershipResult<Vec<MembershipDto>> {
        let rows = if actor.role.can(Capability::ViewAnyMembership) {
            self.membership_repo.list_all().await?
        } else {
            self.membership_repo.list_for_user(actor.user_id).await?
        };

        let now = Utc::now();
        Ok(rows
            .into_iter()
            .map(|entity| MembershipModel::from(entity).to_dto(now))
            .collect())
    }

    pub async fn get(
        &self,
        actor: &AuthenticatedUser,
        membership_id: i64,
    ) -> MembershipResult<MembershipDto> {
        let membership = self
            .membership_repo
            .find_by_id(membership_id)
            .await?
            .ok_or(MembershipError::NotFound)?;

        if !iam::can_view_membership(actor.role, actor.user_id, membership.user_id) {
            warn!(
                user_id = %actor.user_id,
                membership_id,
                "memberships: blocked cross-user membership read"
            );
            return Err(MembershipError::Forbidden);
        }

        Ok(MembershipModel::from(membership).to_dto(Utc::now()))
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        membership_id: i64,
        edit_membership_model: EditMembershipModel,
    ) -> MembershipResult<MembershipDto> {
        if !actor.role.can(Capability::UpdateMembership) {
            return Err(MembershipError::Forbidden);
        }

        let status = MembershipStatus::try_from(edit_membership_model.status.as_str())
            .map_err(|_| {
                MembershipError::ValidationFailed("The selected status is invalid.".to_string())
            })?;

        let membership = self
            .membership_repo
            .update_status(membership_id, status)
            .await?
            .ok_or(MembershipError::NotFound)?;

        info!(membership_id, status = %status, "memberships: status overridden by admin");
        Ok(MembershipModel::from(membership).to_dto(Utc::now()))
    }

    pub async fn delete(
        &self,
        actor: &AuthenticatedUser,
        membership_id: i64,
    ) -> MembershipResult<()> {
        if !actor.role.can(Capability::DeleteMembership) {
            return Err(MembershipError::Forbidden);
        }

        let deleted = self.membership_repo.delete(membership_id).await?;
        if deleted == 0 {
            return Err(MembershipError::NotFound);
        }

        info!(membership_id, "memberships: membership deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::memberships::MembershipEntity,
        repositories::memberships::MockMembershipRepository,
        value_objects::enums::user_roles::Role,
    };
    use chrono::Duration;
    use mockall::predicate::eq;
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

    fn sample_membership(id: i64, user_id: Uuid) -> MembershipEntity {
        let now = Utc::now();
        MembershipEntity {
            id,
            user_id,
            subscription_package_id: 10,
            started_at: now - Duration::days(1),
            expires_at: now + Duration::days(29),
            status: MembershipStatus::Active.to_string(),
            created_at: now - Duration::days(1),
            updated_at: now - Duration::days(1),
        }
    }

    #[tokio::test]
    async fn member_reads_own_membership() {
        let owner_id = Uuid::new_v4();

        let mut membership_repo = MockMembershipRepository::new();
        membership_repo
            .expect_find_by_id()
            .with(eq(1))
            .returning(move |_| Box::pin(async move { Ok(Some(sample_membership(1, owner_id))) }));

        let usecase = MembershipUseCase::new(Arc::new(membership_repo));
        let membership = usecase.get(&member(owner_id), 1).await.unwrap();

        assert_eq!(membership.id, 1);
        assert_eq!(membership.effective_status, MembershipStatus::Active);
    }

    #[tokio::test]
    async fn member_is_forbidden_from_others_membership() {
        let owner_id = Uuid::new_v4();

        let mut membership_repo = MockMembershipRepository::new();
        membership_repo
            .expect_find_by_id()
            .returning(move |_| Box::pin(async move { Ok(Some(sample_membership(1, owner_id))) }));

        let usecase = MembershipUseCase::new(Arc::new(membership_repo));
        let result = usecase.get(&member(Uuid::new_v4()), 1).await;

        assert!(matches!(result, Err(MembershipError::Forbidden)));
    }

    #[tokio::test]
    async fn admin_reads_any_membership() {
        let owner_id = Uuid::new_v4();

        let mut membership_repo = MockMembershipRepository::new();
        membership_repo
            .expect_find_by_id()
            .returning(move |_| Box::pin(async move { Ok(Some(sample_membership(1, owner_id))) }));

        let usecase = MembershipUseCase::new(Arc::new(membership_repo));
        assert!(usecase.get(&admin(), 1).await.is_ok());
    }

    #[tokio::test]
    async fn list_scopes_rows_by_role() {
        let member_user = member(Uuid::new_v4());

        let mut membership_repo = MockMembershipRepository::new();
        membership_repo
            .expect_list_for_user()
            .with(eq(member_user.user_id))
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        let usecase = MembershipUseCase::new(Arc::new(membership_repo));
        assert!(usecase.list(&member_user).await.unwrap().is_empty());

        let mut membership_repo = MockMembershipRepository::new();
        membership_repo
            .expect_list_all()
            .times(1)
            .returning(|| Box::pin(async { Ok(vec![]) }));

        let usecase = MembershipUseCase::new(Arc::new(membership_repo));
        assert!(usecase.list(&admin()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn member_cannot_update_or_delete() {
        let usecase = MembershipUseCase::new(Arc::new(MockMembershipRepository::new()));
        let actor = member(Uuid::new_v4());

        assert!(matches!(
            usecase
                .update(
                    &actor,
                    1,
                    EditMembershipModel {
                        status: "cancelled".to_string(),
                    },
                )
                .await,
            Err(MembershipError::Forbidden)
        ));
        assert!(matches!(
            usecase.delete(&actor, 1).await,
            Err(MembershipError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn update_rejects_unknown_status() {
        let usecase = MembershipUseCase::new(Arc::new(MockMembershipRepository::new()));

        let result = usecase
            .update(
                &admin(),
                1,
                EditMembershipModel {
                    status: "paused".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(MembershipError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn admin_overrides_status() {
        let owner_id = Uuid::new_v4();

        let mut membership_repo = MockMembershipRepository::new();
        membership_repo
            .expect_update_status()
            .with(eq(1), eq(MembershipStatus::Cancelled))
            .times(1)
            .returning(move |_, status| {
                Box::pin(async move {
                    let mut membership = sample_membership(1, owner_id);
                    membership.status = status.to_string();
                    Ok(Some(membership))
                })
            });

        let usecase = MembershipUseCase::new(Arc::new(membership_repo));
        let membership = usecase
            .update(
                &admin(),
                1,
                EditMembershipModel {
                    status: "cancelled".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(membership.status, MembershipStatus::Cancelled);
    }

    #[tokio::test]
    async fn delete_missing_membership_is_not_found() {
        let mut membership_repo = MockMembershipRepository::new();
        membership_repo
            .expect_delete()
            .returning(|_| Box::pin(async { Ok(0) }));

        let usecase = MembershipUseCase::new(Arc::new(membership_repo));
        assert!(matches!(
            usecase.delete(&admin(), 404).await,
            Err(MembershipError::NotFound)
        ));
    }
}
