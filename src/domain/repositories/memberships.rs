use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::memberships::{InsertMembershipEntity, MembershipEntity},
    value_objects::enums::membership_statuses::MembershipStatus,
};

#[async_trait]
#[automock]
pub trait MembershipRepository {
    async fn create(
        &self,
        insert_membership_entity: InsertMembershipEntity,
    ) -> Result<MembershipEntity>;
    async fn find_by_id(&self, membership_id: i64) -> Result<Option<MembershipEntity>>;
    async fn list_all(&self) -> Result<Vec<MembershipEntity>>;
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<MembershipEntity>>;
    async fn update_status(
        &self,
        membership_id: i64,
        status: MembershipStatus,
    ) -> Result<Option<MembershipEntity>>;
    async fn delete(&self, membership_id: i64) -> Result<usize>;
}
