use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::{
    domain::{
        entities::memberships::{InsertMembershipEntity, MembershipEntity},
        repositories::memberships::MembershipRepository,
        value_objects::enums::membership_statuses::MembershipStatus,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::memberships},
};

pub struct MembershipPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl MembershipPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl MembershipRepository for MembershipPostgres {
    async fn create(
        &self,
        insert_membership_entity: InsertMembershipEntity,
    ) -> Result<MembershipEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(memberships::table)
            .values(&insert_membership_entity)
            .returning(MembershipEntity::as_returning())
            .get_result::<MembershipEntity>(&mut conn)?;

        Ok(result)
    }

    async fn find_by_id(&self, membership_id: i64) -> Result<Option<MembershipEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = memberships::table
            .filter(memberships::id.eq(membership_id))
            .select(MembershipEntity::as_select())
            .first::<MembershipEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_all(&self) -> Result<Vec<MembershipEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = memberships::table
            .select(MembershipEntity::as_select())
            .order(memberships::created_at.desc())
            .load::<MembershipEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<MembershipEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = memberships::table
            .filter(memberships::user_id.eq(user_id))
            .select(MembershipEntity::as_select())
            .order(memberships::created_at.desc())
            .load::<MembershipEntity>(&mut conn)?;

        Ok(results)
    }

    async fn update_status(
        &self,
        membership_id: i64,
        status: MembershipStatus,
    ) -> Result<Option<MembershipEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(memberships::table)
            .filter(memberships::id.eq(membership_id))
            .set((
                memberships::status.eq(status.to_string()),
                memberships::updated_at.eq(Utc::now()),
            ))
            .returning(MembershipEntity::as_returning())
            .get_result::<MembershipEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn delete(&self, membership_id: i64) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = delete(memberships::table)
            .filter(memberships::id.eq(membership_id))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
