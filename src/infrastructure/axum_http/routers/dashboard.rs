use std::sync::Arc;

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};

use crate::{
    application::usecases::dashboard::DashboardUseCase,
    auth::AuthenticatedUser,
    domain::repositories::dashboard::DashboardRepository,
    infrastructure::{
        axum_http::error_responses,
        postgres::{postgres_connection::PgPoolSquad, repositories::dashboard::DashboardPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let dashboard_repository = DashboardPostgres::new(Arc::clone(&db_pool));
    let dashboard_usecase = DashboardUseCase::new(Arc::new(dashboard_repository));

    Router::new()
        .route("/dashboard", get(overview::<DashboardPostgres>))
        .with_state(Arc::new(dashboard_usecase))
}

pub async fn overview<D>(
    State(dashboard_usecase): State<Arc<DashboardUseCase<D>>>,
    user: AuthenticatedUser,
) -> impl IntoResponse
where
    D: DashboardRepository + Send + Sync + 'static,
{
    match dashboard_usecase.overview(&user).await {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard)).into_response(),
        Err(err) => error_responses::respond(err.status_code(), err.client_message()),
    }
}
