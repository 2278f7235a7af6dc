pub mod dashboard;
pub mod enums;
pub mod iam;
pub mod memberships;
pub mod packages;
pub mod transactions;
