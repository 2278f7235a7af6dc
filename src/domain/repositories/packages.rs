use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::packages::{EditPackageEntity, InsertPackageEntity, PackageEntity};

#[async_trait]
#[automock]
pub trait PackageRepository {
    async fn create(&self, insert_package_entity: InsertPackageEntity) -> Result<PackageEntity>;
    async fn find_by_id(&self, package_id: i64) -> Result<Option<PackageEntity>>;
    async fn list(&self) -> Result<Vec<PackageEntity>>;
    async fn list_active(&self) -> Result<Vec<PackageEntity>>;
    async fn update(
        &self,
        package_id: i64,
        edit_package_entity: EditPackageEntity,
    ) -> Result<Option<PackageEntity>>;
    async fn delete(&self, package_id: i64) -> Result<usize>;
}
