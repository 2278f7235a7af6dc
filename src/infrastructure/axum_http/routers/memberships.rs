use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::{
    application::usecases::memberships::MembershipUseCase,
    auth::AuthenticatedUser,
    domain::{
        repositories::memberships::MembershipRepository,
        value_objects::memberships::EditMembershipModel,
    },
    infrastructure::{
        axum_http::error_responses,
        postgres::{
            postgres_connection::PgPoolSquad, repositories::memberships::MembershipPostgres,
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let membership_repository = MembershipPostgres::new(Arc::clone(&db_pool));
    let membership_usecase = MembershipUseCase::new(Arc::new(membership_repository));

    Router::new()
        .route(
            "/",
            get(list_memberships::<MembershipPostgres>).post(create_membership),
        )
        .route(
            "/:membership_id",
            get(get_membership::<MembershipPostgres>)
                .put(update_membership::<MembershipPostgres>)
                .delete(delete_membership::<MembershipPostgres>),
        )
        .with_state(Arc::new(membership_usecase))
}

/// Membership rows are only materialized by the payment flow; the resource
/// POST exists for route parity and points the caller at checkout.
pub async fn create_membership(_user: AuthenticatedUser) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Memberships are granted through checkout." })),
    )
        .into_response()
}

pub async fn list_memberships<M>(
    State(membership_usecase): State<Arc<MembershipUseCase<M>>>,
    user: AuthenticatedUser,
) -> impl IntoResponse
where
    M: MembershipRepository + Send + Sync + 'static,
{
    match membership_usecase.list(&user).await {
        Ok(memberships) => (StatusCode::OK, Json(memberships)).into_response(),
        Err(err) => error_responses::respond(err.status_code(), err.client_message()),
    }
}

pub async fn get_membership<M>(
    State(membership_usecase): State<Arc<MembershipUseCase<M>>>,
    user: AuthenticatedUser,
    Path(membership_id): Path<i64>,
) -> impl IntoResponse
where
    M: MembershipRepository + Send + Sync + 'static,
{
    match membership_usecase.get(&user, membership_id).await {
        Ok(membership) => (StatusCode::OK, Json(membership)).into_response(),
        Err(err) => error_responses::respond(err.status_code(), err.client_message()),
    }
}

pub async fn update_membership<M>(
    State(membership_usecase): State<Arc<MembershipUseCase<M>>>,
    user: AuthenticatedUser,
    Path(membership_id): Path<i64>,
    Json(edit_membership_model): Json<EditMembershipModel>,
) -> impl IntoResponse
where
    M: MembershipRepository + Send + Sync + 'static,
{
    match membership_usecase
        .update(&user, membership_id, edit_membership_model)
        .await
    {
        Ok(membership) => (StatusCode::OK, Json(membership)).into_response(),
        Err(err) => error_responses::respond(err.status_code(), err.client_message()),
    }
}

pub async fn delete_membership<M>(
    State(membership_usecase): State<Arc<MembershipUseCase<M>>>,
    user: AuthenticatedUser,
    Path(membership_id): Path<i64>,
) -> impl IntoResponse
where
    M: MembershipRepository + Send + Sync + 'static,
{
    match membership_usecase.delete(&user, membership_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_responses::respond(err.status_code(), err.client_message()),
    }
}
