pub mod memberships;
pub mod packages;
pub mod transactions;
pub mod users;
