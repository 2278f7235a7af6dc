pub mod membership_statuses;
pub mod payment_methods;
pub mod transaction_statuses;
pub mod user_roles;
