use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::transactions::TransactionEntity,
    value_objects::{
        enums::transaction_statuses::TransactionStatus, memberships::MembershipDto,
        packages::PackageModel,
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionModel {
    pub id: i64,
    pub user_id: Uuid,
    pub subscription_package_id: i64,
    pub membership_id: Option<i64>,
    pub transaction_code: String,
    pub order_id: String,
    pub amount_minor: i32,
    pub status: TransactionStatus,
    pub payment_method: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<TransactionEntity> for TransactionModel {
    fn from(value: TransactionEntity) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            subscription_package_id: value.subscription_package_id,
            membership_id: value.membership_id,
            transaction_code: value.transaction_code,
            order_id: value.order_id,
            amount_minor: value.amount_minor,
            status: TransactionStatus::try_from(value.status.as_str())
                .unwrap_or(TransactionStatus::Failed),
            payment_method: value.payment_method,
            paid_at: value.paid_at,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub subscription_package_id: i64,
}

#[derive(Debug, Serialize)]
pub struct CheckoutPreview {
    pub package: PackageModel,
    pub snap_token: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub transaction: TransactionModel,
    pub snap_token: String,
}

/// Query payload the gateway delivers to `/payment/callback`. Everything it
/// sends is kept and stored verbatim on the transaction row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCallbackModel {
    pub order_id: String,
    pub transaction_status: String,
    pub fraud_status: Option<String>,
    pub payment_type: Option<String>,
    pub transaction_id: Option<String>,
    pub status_code: Option<String>,
    pub gross_amount: Option<String>,
    pub signature_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TransactionDetailDto {
    pub transaction: TransactionModel,
    pub package: PackageModel,
    pub membership: Option<MembershipDto>,
}
