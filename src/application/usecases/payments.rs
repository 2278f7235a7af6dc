use std::sync::Arc;

use anyhow::{Context, Result as AnyResult, anyhow};
use async_trait::async_trait;
use chrono::{Months, Utc};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::AuthenticatedUser,
    domain::{
        entities::{memberships::InsertMembershipEntity, transactions::{InsertTransactionEntity, TransactionEntity}},
        repositories::{
            memberships::MembershipRepository, packages::PackageRepository,
            transactions::TransactionRepository,
        },
        value_objects::{
            enums::{
                membership_statuses::MembershipStatus, payment_methods::PaymentMethod,
                transaction_statuses::TransactionStatus,
            },
            iam::Capability,
            memberships::MembershipModel,
            packages::PackageModel,
            transactions::{
                CheckoutPreview, CheckoutRequest, CheckoutResponse, PaymentCallbackModel,
                TransactionDetailDto, TransactionModel,
            },
        },
    },
    payments::midtrans_client::MidtransClient,
};

/// Narrow seam to the payment gateway: a checkout token out, a status
/// callback in. A real Midtrans integration replaces the client without
/// touching the ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapGateway: Send + Sync {
    async fn create_snap_token(&self, order_id: &str, gross_amount_minor: i32)
    -> AnyResult<String>;
}

#[async_trait]
impl SnapGateway for MidtransClient {
    async fn create_snap_token(
        &self,
        order_id: &str,
        gross_amount_minor: i32,
    ) -> AnyResult<String> {
        self.create_snap_token(order_id, gross_amount_minor).await
    }
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Subscription package not found")]
    InvalidPackage,
    #[error("Transaction not found")]
    TransactionNotFound,
    #[error("Unauthorized to view this transaction")]
    Forbidden,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PaymentError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PaymentError::InvalidPackage => StatusCode::NOT_FOUND,
            PaymentError::TransactionNotFound => StatusCode::NOT_FOUND,
            PaymentError::Forbidden => StatusCode::FORBIDDEN,
            PaymentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn client_message(&self) -> String {
        match self {
            // Internal detail stays out of responses
            PaymentError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

pub type PaymentResult<T> = std::result::Result<T, PaymentError>;

/// Maps the gateway's status vocabulary onto the ledger's closed status set.
pub fn map_gateway_status(transaction_status: &str) -> TransactionStatus {
    match transaction_status {
        "capture" | "settlement" => TransactionStatus::Paid,
        "pending" => TransactionStatus::Pending,
        _ => TransactionStatus::Failed,
    }
}

fn new_transaction_code() -> String {
    format!("TXN-{}", Uuid::new_v4().simple())
}

fn new_order_id(user_id: Uuid, now: chrono::DateTime<Utc>) -> String {
    format!("ORDER-{}-{}", now.timestamp(), user_id.simple())
}

pub struct PaymentUseCase<T, P, M, G>
where
    T: TransactionRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    M: MembershipRepository + Send + Sync + 'static,
    G: SnapGateway + Send + Sync + 'static,
{
    transaction_repo: Arc<T>,
    package_repo: Arc<P>,
    membership_repo: Arc<M>,
    snap_gateway: Arc<G>,
}

impl<T, P, M, G> PaymentUseCase<T, P, M, G>
where
    T: TransactionRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    M: MembershipRepository + Send + Sync + 'static,
    G: SnapGateway + Send + Sync + 'static,
{
    pub fn new(
        transaction_repo: Arc<T>,
        package_repo: Arc<P>,
        membership_repo: Arc<M>,
        snap_gateway: Arc<G>,
    ) -> Self {
        Self {
            transaction_repo,
            package_repo,
            membership_repo,
            snap_gateway,
        }
    }

    /// Checkout page payload: the package plus a gateway token for it. No
    /// transaction row exists yet; that happens on `initiate`.
    pub async fn checkout_preview(
        &self,
        user_id: Uuid,
        package_id: i64,
    ) -> PaymentResult<CheckoutPreview> {
        let package = self
            .package_repo
            .find_by_id(package_id)
            .await?
            .ok_or(PaymentError::InvalidPackage)?;

        let order_ref = new_order_id(user_id, Utc::now());
        let snap_token = self
            .snap_gateway
            .create_snap_token(&order_ref, package.price_minor)
            .await?;

        Ok(CheckoutPreview {
            package: PackageModel::from(package),
            snap_token,
        })
    }

    pub async fn initiate(
        &self,
        user_id: Uuid,
        checkout: CheckoutRequest,
    ) -> PaymentResult<CheckoutResponse> {
        let package = self
            .package_repo
            .find_by_id(checkout.subscription_package_id)
            .await?
            .ok_or_else(|| {
                warn!(
                    %user_id,
                    package_id = checkout.subscription_package_id,
                    "payments: checkout against unknown package"
                );
                PaymentError::InvalidPackage
            })?;

        let now = Utc::now();
        let transaction = self
            .transaction_repo
            .create(InsertTransactionEntity {
                user_id,
                subscription_package_id: package.id,
                transaction_code: new_transaction_code(),
                order_id: new_order_id(user_id, now),
                // price snapshot: later package edits never touch this row
                amount_minor: package.price_minor,
                status: TransactionStatus::Pending.to_string(),
                created_at: now,
                updated_at: now,
            })
            .await?;

        let snap_token = self
            .snap_gateway
            .create_snap_token(&transaction.order_id, transaction.amount_minor)
            .await?;

        info!(
            %user_id,
            package_id = package.id,
            order_id = %transaction.order_id,
            amount_minor = transaction.amount_minor,
            "payments: checkout initiated"
        );

        Ok(CheckoutResponse {
            transaction: TransactionModel::from(transaction),
            snap_token,
        })
    }

    /// Applies one gateway callback. Every transition only fires while the
    /// row is still pending, so replays and concurrent callbacks settle a
    /// transaction exactly once.
    pub async fn handle_callback(&self, payload: PaymentCallbackModel) -> PaymentResult<()> {
        info!(
            order_id = %payload.order_id,
            transaction_status = %payload.transaction_status,
            fraud_status = ?payload.fraud_status,
            "payments: gateway callback received"
        );

        let raw_payload = serde_json::to_value(&payload)
            .context("failed to serialize gateway callback payload")?;

        let Some(transaction) = self
            .transaction_repo
            .find_by_order_id(payload.order_id.clone())
            .await?
        else {
            warn!(order_id = %payload.order_id, "payments: callback for unknown order id");
            return Err(PaymentError::TransactionNotFound);
        };

        match map_gateway_status(&payload.transaction_status) {
            TransactionStatus::Paid => {
                let payment_method = payload
                    .payment_type
                    .as_deref()
                    .map(|payment_type| PaymentMethod::from_gateway(payment_type).to_string());

                let updated = self
                    .transaction_repo
                    .mark_paid_if_pending(
                        payload.order_id.clone(),
                        Utc::now(),
                        payment_method,
                        raw_payload,
                    )
                    .await?;

                match updated {
                    Some(updated) => {
                        info!(
                            order_id = %updated.order_id,
                            transaction_id = updated.id,
                            "payments: transaction marked paid"
                        );
                        self.grant_membership(&updated).await?;
                    }
                    None => {
                        info!(
                            order_id = %payload.order_id,
                            current_status = %transaction.status,
                            "payments: paid callback replayed; transaction already settled"
                        );
                    }
                }
            }
            TransactionStatus::Pending => {
                self.transaction_repo
                    .mark_status_if_pending(
                        payload.order_id.clone(),
                        TransactionStatus::Pending,
                        raw_payload,
                    )
                    .await?;
            }
            _ => {
                let updated = self
                    .transaction_repo
                    .mark_status_if_pending(
                        payload.order_id.clone(),
                        TransactionStatus::Failed,
                        raw_payload,
                    )
                    .await?;

                if updated.is_none() {
                    info!(
                        order_id = %payload.order_id,
                        current_status = %transaction.status,
                        "payments: failure callback ignored; transaction already settled"
                    );
                }
            }
        }

        Ok(())
    }

    /// Creates the membership a paid transaction entitles the buyer to and
    /// links it back. Skips transactions that already carry a membership.
    async fn grant_membership(&self, transaction: &TransactionEntity) -> PaymentResult<()> {
        if let Some(membership_id) = transaction.membership_id {
            info!(
                transaction_id = transaction.id,
                membership_id, "payments: membership already granted; skipping"
            );
            return Ok(());
        }

        let package = self
            .package_repo
            .find_by_id(transaction.subscription_package_id)
            .await?
            .ok_or_else(|| {
                PaymentError::Internal(anyhow!(
                    "package {} missing for paid transaction {}",
                    transaction.subscription_package_id,
                    transaction.id
                ))
            })?;

        let started_at = Utc::now();
        let expires_at = started_at
            .checked_add_months(Months::new(package.duration_months as u32))
            .context("failed to compute membership expiry")?;

        let membership = self
            .membership_repo
            .create(InsertMembershipEntity {
                user_id: transaction.user_id,
                subscription_package_id: package.id,
                started_at,
                expires_at,
                status: MembershipStatus::Active.to_string(),
                created_at: started_at,
                updated_at: started_at,
            })
            .await?;

        self.transaction_repo
            .attach_membership(transaction.id, membership.id)
            .await?;

        info!(
            transaction_id = transaction.id,
            membership_id = membership.id,
            expires_at = %expires_at,
            "payments: membership granted"
        );

        Ok(())
    }

    pub async fn success(
        &self,
        actor: &AuthenticatedUser,
        transaction_id: i64,
    ) -> PaymentResult<TransactionDetailDto> {
        let transaction = self
            .transaction_repo
            .find_by_id(transaction_id)
            .await?
            .ok_or(PaymentError::TransactionNotFound)?;

        if !(actor.role.can(Capability::ViewAnyTransaction)
            || transaction.user_id == actor.user_id)
        {
            return Err(PaymentError::Forbidden);
        }

        let package = self
            .package_repo
            .find_by_id(transaction.subscription_package_id)
            .await?
            .ok_or_else(|| {
                PaymentError::Internal(anyhow!(
                    "package {} missing for transaction {}",
                    transaction.subscription_package_id,
                    transaction.id
                ))
            })?;

        let membership = match transaction.membership_id {
            Some(membership_id) => self
                .membership_repo
                .find_by_id(membership_id)
                .await?
                .map(|membership| MembershipModel::from(membership).to_dto(Utc::now())),
            None => None,
        };

        Ok(TransactionDetailDto {
            transaction: TransactionModel::from(transaction),
            package: PackageModel::from(package),
            membership,
        })
    }

    pub async fn list(&self, actor: &AuthenticatedUser) -> PaymentResult<Vec<TransactionModel>> {
        let rows = if actor.role.can(Capability::ListAllTransactions) {
            self.transaction_repo.list_all().await?
        } else {
            self.transaction_repo.list_for_user(actor.user_id).await?
        };

        Ok(rows.into_iter().map(TransactionModel::from).collect())
    }

    /// The cancel flow records nothing; the pending row stays for the ledger.
    pub async fn cancel(&self, actor: &AuthenticatedUser) -> PaymentResult<()> {
        info!(user_id = %actor.user_id, "payments: payment cancelled by user; no state recorded");
        Ok(())
    }
}
