use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::memberships::MembershipEntity,
    value_objects::enums::membership_statuses::MembershipStatus,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MembershipModel {
    pub id: i64,
    pub user_id: Uuid,
    pub subscription_package_id: i64,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: MembershipStatus,
    pub created_at: DateTime<Utc>,
}

impl From<MembershipEntity> for MembershipModel {
    fn from(value: MembershipEntity) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            subscription_package_id: value.subscription_package_id,
            started_at: value.started_at,
            expires_at: value.expires_at,
            status: MembershipStatus::try_from(value.status.as_str())
                .unwrap_or(MembershipStatus::Expired),
            created_at: value.created_at,
        }
    }
}

impl MembershipModel {
    /// Nothing sweeps stored statuses; expiry is decided at read time.
    /// An admin override (cancelled/expired) always wins over the clock.
    pub fn effective_status(&self, now: DateTime<Utc>) -> MembershipStatus {
        match self.status {
            MembershipStatus::Active if self.expires_at <= now => MembershipStatus::Expired,
            status => status,
        }
    }

    pub fn to_dto(&self, now: DateTime<Utc>) -> MembershipDto {
        MembershipDto {
            id: self.id,
            user_id: self.user_id,
            subscription_package_id: self.subscription_package_id,
            started_at: self.started_at,
            expires_at: self.expires_at,
            status: self.status,
            effective_status: self.effective_status(now),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MembershipDto {
    pub id: i64,
    pub user_id: Uuid,
    pub subscription_package_id: i64,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: MembershipStatus,
    pub effective_status: MembershipStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditMembershipModel {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_model(status: MembershipStatus, expires_in: Duration) -> MembershipModel {
        let now = Utc::now();
        MembershipModel {
            id: 1,
            user_id: Uuid::new_v4(),
            subscription_package_id: 1,
            started_at: now - Duration::days(30),
            expires_at: now + expires_in,
            status,
            created_at: now - Duration::days(30),
        }
    }

    #[test]
    fn active_membership_within_window_stays_active() {
        let model = sample_model(MembershipStatus::Active, Duration::days(1));
        assert_eq!(
            model.effective_status(Utc::now()),
            MembershipStatus::Active
        );
    }

    #[test]
    fn active_membership_past_expiry_reads_as_expired() {
        let model = sample_model(MembershipStatus::Active, Duration::days(-1));
        assert_eq!(
            model.effective_status(Utc::now()),
            MembershipStatus::Expired
        );
    }

    #[test]
    fn cancelled_membership_is_never_resurrected_by_the_clock() {
        let model = sample_model(MembershipStatus::Cancelled, Duration::days(10));
        assert_eq!(
            model.effective_status(Utc::now()),
            MembershipStatus::Cancelled
        );
    }
}
