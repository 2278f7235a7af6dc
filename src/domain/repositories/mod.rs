pub mod dashboard;
pub mod memberships;
pub mod packages;
pub mod transactions;
