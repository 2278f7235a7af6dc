use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};

use crate::{
    domain::{
        entities::packages::{EditPackageEntity, InsertPackageEntity, PackageEntity},
        repositories::packages::PackageRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::subscription_packages},
};

pub struct PackagePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PackagePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PackageRepository for PackagePostgres {
    async fn create(&self, insert_package_entity: InsertPackageEntity) -> Result<PackageEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(subscription_packages::table)
            .values(&insert_package_entity)
            .returning(PackageEntity::as_returning())
            .get_result::<PackageEntity>(&mut conn)?;

        Ok(result)
    }

    async fn find_by_id(&self, package_id: i64) -> Result<Option<PackageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = subscription_packages::table
            .filter(subscription_packages::id.eq(package_id))
            .select(PackageEntity::as_select())
            .first::<PackageEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list(&self) -> Result<Vec<PackageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = subscription_packages::table
            .select(PackageEntity::as_select())
            .order(subscription_packages::created_at.desc())
            .load::<PackageEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_active(&self) -> Result<Vec<PackageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = subscription_packages::table
            .filter(subscription_packages::is_active.eq(true))
            .select(PackageEntity::as_select())
            .load::<PackageEntity>(&mut conn)?;

        Ok(results)
    }

    async fn update(
        &self,
        package_id: i64,
        edit_package_entity: EditPackageEntity,
    ) -> Result<Option<PackageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(subscription_packages::table)
            .filter(subscription_packages::id.eq(package_id))
            .set(&edit_package_entity)
            .returning(PackageEntity::as_returning())
            .get_result::<PackageEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn delete(&self, package_id: i64) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = delete(subscription_packages::table)
            .filter(subscription_packages::id.eq(package_id))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
