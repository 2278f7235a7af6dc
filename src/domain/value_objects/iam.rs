use uuid::Uuid;

use crate::domain::value_objects::enums::user_roles::Role;

/// Everything a request may be gated on. Kept as a closed set so a new
/// operation has to show up here before any route can check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ListPackages,
    CreatePackage,
    UpdatePackage,
    DeletePackage,
    UpdateMembership,
    DeleteMembership,
    ViewAnyMembership,
    ViewAnyTransaction,
    ListAllTransactions,
}

impl Role {
    /// Pure capability check; no side effects, deterministic per (role, capability).
    pub fn can(&self, capability: Capability) -> bool {
        match (self, capability) {
            (Role::Admin, _) => true,
            (Role::Member, _) => false,
        }
    }
}

/// Admins may view any membership; members only their own.
pub fn can_view_membership(role: Role, actor_id: Uuid, owner_id: Uuid) -> bool {
    role.can(Capability::ViewAnyMembership) || actor_id == owner_id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_holds_every_capability() {
        for capability in [
            Capability::ListPackages,
            Capability::CreatePackage,
            Capability::UpdatePackage,
            Capability::DeletePackage,
            Capability::UpdateMembership,
            Capability::DeleteMembership,
            Capability::ViewAnyMembership,
            Capability::ViewAnyTransaction,
            Capability::ListAllTransactions,
        ] {
            assert!(Role::Admin.can(capability));
            assert!(!Role::Member.can(capability));
        }
    }

    #[test]
    fn member_views_only_own_membership() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        assert!(can_view_membership(Role::Member, owner, owner));
        assert!(!can_view_membership(Role::Member, stranger, owner));
        assert!(can_view_membership(Role::Admin, stranger, owner));
    }
}
