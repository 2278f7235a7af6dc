use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::{
    application::usecases::packages::PackageUseCase,
    auth::AuthenticatedUser,
    domain::{
        repositories::packages::PackageRepository,
        value_objects::packages::{CreatePackageModel, EditPackageModel},
    },
    infrastructure::{
        axum_http::error_responses,
        postgres::{postgres_connection::PgPoolSquad, repositories::packages::PackagePostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let package_repository = PackagePostgres::new(Arc::clone(&db_pool));
    let package_usecase = PackageUseCase::new(Arc::new(package_repository));

    Router::new()
        .route(
            "/",
            get(list_packages::<PackagePostgres>).post(create_package::<PackagePostgres>),
        )
        .route(
            "/:package_id",
            get(get_package::<PackagePostgres>)
                .put(update_package::<PackagePostgres>)
                .delete(delete_package::<PackagePostgres>),
        )
        .with_state(Arc::new(package_usecase))
}

pub async fn list_packages<P>(
    State(package_usecase): State<Arc<PackageUseCase<P>>>,
    user: AuthenticatedUser,
) -> impl IntoResponse
where
    P: PackageRepository + Send + Sync + 'static,
{
    match package_usecase.list(&user).await {
        Ok(packages) => (StatusCode::OK, Json(packages)).into_response(),
        Err(err) => error_responses::respond(err.status_code(), err.client_message()),
    }
}

pub async fn get_package<P>(
    State(package_usecase): State<Arc<PackageUseCase<P>>>,
    user: AuthenticatedUser,
    Path(package_id): Path<i64>,
) -> impl IntoResponse
where
    P: PackageRepository + Send + Sync + 'static,
{
    match package_usecase.get(&user, package_id).await {
        Ok(package) => (StatusCode::OK, Json(package)).into_response(),
        Err(err) => error_responses::respond(err.status_code(), err.client_message()),
    }
}

pub async fn create_package<P>(
    State(package_usecase): State<Arc<PackageUseCase<P>>>,
    user: AuthenticatedUser,
    Json(create_package_model): Json<CreatePackageModel>,
) -> impl IntoResponse
where
    P: PackageRepository + Send + Sync + 'static,
{
    match package_usecase.create(&user, create_package_model).await {
        Ok(package) => (StatusCode::CREATED, Json(package)).into_response(),
        Err(err) => error_responses::respond(err.status_code(), err.client_message()),
    }
}

pub async fn update_package<P>(
    State(package_usecase): State<Arc<PackageUseCase<P>>>,
    user: AuthenticatedUser,
    Path(package_id): Path<i64>,
    Json(edit_package_model): Json<EditPackageModel>,
) -> impl IntoResponse
where
    P: PackageRepository + Send + Sync + 'static,
{
    match package_usecase
        .update(&user, package_id, edit_package_model)
        .await
    {
        Ok(package) => (StatusCode::OK, Json(package)).into_response(),
        Err(err) => error_responses::respond(err.status_code(), err.client_message()),
    }
}

pub async fn delete_package<P>(
    State(package_usecase): State<Arc<PackageUseCase<P>>>,
    user: AuthenticatedUser,
    Path(package_id): Path<i64>,
) -> impl IntoResponse
where
    P: PackageRepository + Send + Sync + 'static,
{
    match package_usecase.delete(&user, package_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_responses::respond(err.status_code(), err.client_message()),
    }
}
