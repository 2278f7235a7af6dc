use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    auth::AuthenticatedUser,
    domain::{
        repositories::packages::PackageRepository,
        value_objects::{
            iam::Capability,
            packages::{CreatePackageModel, EditPackageModel, PackageModel},
        },
    },
};

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("Unauthorized to manage subscription packages")]
    Forbidden,
    #[error("Subscription package not found")]
    NotFound,
    #[error("{0}")]
    ValidationFailed(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PackageError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PackageError::Forbidden => StatusCode::FORBIDDEN,
            PackageError::NotFound => StatusCode::NOT_FOUND,
            PackageError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PackageError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn client_message(&self) -> String {
        match self {
            PackageError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

pub type PackageResult<T> = std::result::Result<T, PackageError>;

pub struct PackageUseCase<P>
where
    P: PackageRepository + Send + Sync + 'static,
{
    package_repo: Arc<P>,
}

impl<P> PackageUseCase<P>
where
    P: PackageRepository + Send + Sync + 'static,
{
    pub fn new(package_repo: Arc<P>) -> Self {
        Self { package_repo }
    }

    pub async fn list(&self, actor: &AuthenticatedUser) -> PackageResult<Vec<PackageModel>> {
        if !actor.role.can(Capability::ListPackages) {
            return Err(PackageError::Forbidden);
        }

        let packages = self.package_repo.list().await?;
        Ok(packages.into_iter().map(PackageModel::from).collect())
    }

    pub async fn get(&self, actor: &AuthenticatedUser, package_id: i64) -> PackageResult<PackageModel> {
        if !actor.role.can(Capability::ListPackages) {
            return Err(PackageError::Forbidden);
        }

        let package = self
            .package_repo
            .find_by_id(package_id)
            .await?
            .ok_or(PackageError::NotFound)?;

        Ok(PackageModel::from(package))
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        create_package_model: CreatePackageModel,
    ) -> PackageResult<PackageModel> {
        if !actor.role.can(Capability::CreatePackage) {
            warn!(user_id = %actor.user_id, "packages: non-admin attempted package create");
            return Err(PackageError::Forbidden);
        }

        create_package_model
            .validate()
            .map_err(PackageError::ValidationFailed)?;

        let package = self
            .package_repo
            .create(create_package_model.to_entity())
            .await?;

        info!(package_id = package.id, name = %package.name, "packages: package created");
        Ok(PackageModel::from(package))
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        package_id: i64,
        edit_package_model: EditPackageModel,
    ) -> PackageResult<PackageModel> {
        if !actor.role.can(Capability::UpdatePackage) {
            warn!(user_id = %actor.user_id, package_id, "packages: non-admin attempted package update");
            return Err(PackageError::Forbidden);
        }

        edit_package_model
            .validate()
            .map_err(PackageError::ValidationFailed)?;

        let package = self
            .package_repo
            .update(package_id, edit_package_model.to_entity())
            .await?
            .ok_or(PackageError::NotFound)?;

        info!(package_id = package.id, "packages: package updated");
        Ok(PackageModel::from(package))
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, package_id: i64) -> PackageResult<()> {
        if !actor.role.can(Capability::DeletePackage) {
            warn!(user_id = %actor.user_id, package_id, "packages: non-admin attempted package delete");
            return Err(PackageError::Forbidden);
        }

        let deleted = self.package_repo.delete(package_id).await?;
        if deleted == 0 {
            return Err(PackageError::NotFound);
        }

        info!(package_id, "packages: package deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::packages::{InsertPackageEntity, PackageEntity},
        repositories::packages::MockPackageRepository,
        value_objects::enums::user_roles::Role,
    };
    use uuid::Uuid;

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
            email: None,
        }
    }

    fn member() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role: Role::Member,
            email: None,
        }
    }

    fn package_from_insert(entity: InsertPackageEntity, id: i64) -> PackageEntity {
        PackageEntity {
            id,
            name: entity.name,
            description: entity.description,
            duration_months: entity.duration_months,
            price_minor: entity.price_minor,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    fn sample_create() -> CreatePackageModel {
        CreatePackageModel {
            name: "Basic".to_string(),
            description: "One month of access".to_string(),
            duration_months: 1,
            price_minor: 99000,
            is_active: Some(true),
        }
    }

    #[tokio::test]
    async fn member_is_forbidden_from_all_package_writes() {
        let usecase = PackageUseCase::new(Arc::new(MockPackageRepository::new()));

        assert!(matches!(
            usecase.create(&member(), sample_create()).await,
            Err(PackageError::Forbidden)
        ));
        assert!(matches!(
            usecase
                .update(
                    &member(),
                    1,
                    EditPackageModel {
                        name: None,
                        description: None,
                        duration_months: None,
                        price_minor: None,
                        is_active: Some(false),
                    },
                )
                .await,
            Err(PackageError::Forbidden)
        ));
        assert!(matches!(
            usecase.delete(&member(), 1).await,
            Err(PackageError::Forbidden)
        ));
        assert!(matches!(
            usecase.list(&member()).await,
            Err(PackageError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn admin_creates_valid_package() {
        let mut package_repo = MockPackageRepository::new();
        package_repo
            .expect_create()
            .withf(|entity| entity.name == "Basic" && entity.price_minor == 99000)
            .returning(|entity| Box::pin(async move { Ok(package_from_insert(entity, 1)) }));

        let usecase = PackageUseCase::new(Arc::new(package_repo));
        let package = usecase.create(&admin(), sample_create()).await.unwrap();

        assert_eq!(package.id, 1);
        assert_eq!(package.duration_months, 1);
    }

    #[tokio::test]
    async fn create_rejects_invalid_duration_before_touching_storage() {
        let mut model = sample_create();
        model.duration_months = 0;

        // no repo expectations: a write would panic
        let usecase = PackageUseCase::new(Arc::new(MockPackageRepository::new()));
        let result = usecase.create(&admin(), model).await;

        assert!(matches!(result, Err(PackageError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn update_missing_package_is_not_found() {
        let mut package_repo = MockPackageRepository::new();
        package_repo
            .expect_update()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let usecase = PackageUseCase::new(Arc::new(package_repo));
        let result = usecase
            .update(
                &admin(),
                404,
                EditPackageModel {
                    name: None,
                    description: None,
                    duration_months: None,
                    price_minor: None,
                    is_active: Some(false),
                },
            )
            .await;

        assert!(matches!(result, Err(PackageError::NotFound)));
    }

    #[tokio::test]
    async fn delete_missing_package_is_not_found() {
        let mut package_repo = MockPackageRepository::new();
        package_repo
            .expect_delete()
            .returning(|_| Box::pin(async { Ok(0) }));

        let usecase = PackageUseCase::new(Arc::new(package_repo));
        assert!(matches!(
            usecase.delete(&admin(), 404).await,
            Err(PackageError::NotFound)
        ));
    }
}
