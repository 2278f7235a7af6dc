use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde_json::json;

use crate::{
    application::usecases::payments::{PaymentError, PaymentUseCase, SnapGateway},
    auth::AuthenticatedUser,
    config::config_model::DotEnvyConfig,
    domain::{
        repositories::{
            memberships::MembershipRepository, packages::PackageRepository,
            transactions::TransactionRepository,
        },
        value_objects::transactions::{CheckoutRequest, PaymentCallbackModel},
    },
    infrastructure::{
        axum_http::error_responses,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{
                memberships::MembershipPostgres, packages::PackagePostgres,
                transactions::TransactionPostgres,
            },
        },
    },
    payments::midtrans_client::MidtransClient,
};

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let transaction_repository = TransactionPostgres::new(Arc::clone(&db_pool));
    let package_repository = PackagePostgres::new(Arc::clone(&db_pool));
    let membership_repository = MembershipPostgres::new(Arc::clone(&db_pool));
    let midtrans_client = MidtransClient::new(config.midtrans.server_key.clone());
    let payment_usecase = PaymentUseCase::new(
        Arc::new(transaction_repository),
        Arc::new(package_repository),
        Arc::new(membership_repository),
        Arc::new(midtrans_client),
    );

    Router::new()
        .route(
            "/payment/callback",
            get(payment_callback::<
                TransactionPostgres,
                PackagePostgres,
                MembershipPostgres,
                MidtransClient,
            >),
        )
        .route(
            "/payment/success/:transaction_id",
            get(payment_success::<
                TransactionPostgres,
                PackagePostgres,
                MembershipPostgres,
                MidtransClient,
            >),
        )
        .route(
            "/payment/cancel",
            delete(cancel_payment::<
                TransactionPostgres,
                PackagePostgres,
                MembershipPostgres,
                MidtransClient,
            >),
        )
        .route(
            "/payment/:package_id",
            get(checkout_preview::<
                TransactionPostgres,
                PackagePostgres,
                MembershipPostgres,
                MidtransClient,
            >),
        )
        .route(
            "/payment",
            post(initiate_payment::<
                TransactionPostgres,
                PackagePostgres,
                MembershipPostgres,
                MidtransClient,
            >),
        )
        .route(
            "/transactions",
            get(list_transactions::<
                TransactionPostgres,
                PackagePostgres,
                MembershipPostgres,
                MidtransClient,
            >),
        )
        .with_state(Arc::new(payment_usecase))
}

pub async fn checkout_preview<T, P, M, G>(
    State(payment_usecase): State<Arc<PaymentUseCase<T, P, M, G>>>,
    user: AuthenticatedUser,
    Path(package_id): Path<i64>,
) -> impl IntoResponse
where
    T: TransactionRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    M: MembershipRepository + Send + Sync + 'static,
    G: SnapGateway + Send + Sync + 'static,
{
    match payment_usecase
        .checkout_preview(user.user_id, package_id)
        .await
    {
        Ok(preview) => (StatusCode::OK, Json(preview)).into_response(),
        Err(err) => error_responses::respond(err.status_code(), err.client_message()),
    }
}

pub async fn initiate_payment<T, P, M, G>(
    State(payment_usecase): State<Arc<PaymentUseCase<T, P, M, G>>>,
    user: AuthenticatedUser,
    Json(checkout_request): Json<CheckoutRequest>,
) -> impl IntoResponse
where
    T: TransactionRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    M: MembershipRepository + Send + Sync + 'static,
    G: SnapGateway + Send + Sync + 'static,
{
    match payment_usecase.initiate(user.user_id, checkout_request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(err) => error_responses::respond(err.status_code(), err.client_message()),
    }
}

/// Gateway webhook. Unknown order ids come back as an error body the gateway
/// can see and retry on; they are never an unhandled fault.
pub async fn payment_callback<T, P, M, G>(
    State(payment_usecase): State<Arc<PaymentUseCase<T, P, M, G>>>,
    Query(callback): Query<PaymentCallbackModel>,
) -> impl IntoResponse
where
    T: TransactionRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    M: MembershipRepository + Send + Sync + 'static,
    G: SnapGateway + Send + Sync + 'static,
{
    match payment_usecase.handle_callback(callback).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "success" }))).into_response(),
        Err(err @ PaymentError::TransactionNotFound) => (
            err.status_code(),
            Json(json!({ "status": "error", "message": err.client_message() })),
        )
            .into_response(),
        Err(err) => error_responses::respond(err.status_code(), err.client_message()),
    }
}

pub async fn payment_success<T, P, M, G>(
    State(payment_usecase): State<Arc<PaymentUseCase<T, P, M, G>>>,
    user: AuthenticatedUser,
    Path(transaction_id): Path<i64>,
) -> impl IntoResponse
where
    T: TransactionRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    M: MembershipRepository + Send + Sync + 'static,
    G: SnapGateway + Send + Sync + 'static,
{
    match payment_usecase.success(&user, transaction_id).await {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(err) => error_responses::respond(err.status_code(), err.client_message()),
    }
}

pub async fn cancel_payment<T, P, M, G>(
    State(payment_usecase): State<Arc<PaymentUseCase<T, P, M, G>>>,
    user: AuthenticatedUser,
) -> impl IntoResponse
where
    T: TransactionRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    M: MembershipRepository + Send + Sync + 'static,
    G: SnapGateway + Send + Sync + 'static,
{
    match payment_usecase.cancel(&user).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Payment cancelled." })),
        )
            .into_response(),
        Err(err) => error_responses::respond(err.status_code(), err.client_message()),
    }
}

pub async fn list_transactions<T, P, M, G>(
    State(payment_usecase): State<Arc<PaymentUseCase<T, P, M, G>>>,
    user: AuthenticatedUser,
) -> impl IntoResponse
where
    T: TransactionRepository + Send + Sync + 'static,
    P: PackageRepository + Send + Sync + 'static,
    M: MembershipRepository + Send + Sync + 'static,
    G: SnapGateway + Send + Sync + 'static,
{
    match payment_usecase.list(&user).await {
        Ok(transactions) => (StatusCode::OK, Json(transactions)).into_response(),
        Err(err) => error_responses::respond(err.status_code(), err.client_message()),
    }
}
