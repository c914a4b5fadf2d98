// src/handlers/warehouses.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        extract::{JsonBody, PathParam},
    },
    config::AppState,
    middleware::{auth::RequireSuperuser, i18n::Locale},
    models::warehouse::{CreateWarehousePayload, UpdateWarehousePayload, Warehouse},
};

#[utoipa::path(
    get,
    path = "/warehouses/",
    tag = "Warehouses",
    responses((status = 200, description = "Armazéns", body = Vec<Warehouse>)),
    security(("api_token" = []))
)]
pub async fn list_warehouses(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<Warehouse>>, ApiError> {
    let warehouses = app_state
        .warehouse_repo
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(warehouses))
}

#[utoipa::path(
    post,
    path = "/warehouses/",
    tag = "Warehouses",
    request_body = CreateWarehousePayload,
    responses(
        (status = 201, description = "Armazém criado", body = Warehouse),
        (status = 400, description = "Nome duplicado, dono inexistente ou dados inválidos")
    ),
    security(("api_token" = []))
)]
pub async fn create_warehouse(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    JsonBody(payload): JsonBody<CreateWarehousePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let warehouse = app_state
        .warehouse_repo
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(warehouse)))
}

#[utoipa::path(
    put,
    path = "/warehouses/{id}/",
    tag = "Warehouses",
    request_body = UpdateWarehousePayload,
    params(("id" = i64, Path, description = "ID do armazém")),
    responses(
        (status = 200, description = "Armazém atualizado", body = Warehouse),
        (status = 404, description = "Armazém não encontrado")
    ),
    security(("api_token" = []))
)]
pub async fn update_warehouse(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    PathParam(warehouse_id): PathParam<i64>,
    JsonBody(payload): JsonBody<UpdateWarehousePayload>,
) -> Result<Json<Warehouse>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let warehouse = app_state
        .warehouse_repo
        .update(warehouse_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(warehouse))
}

#[utoipa::path(
    delete,
    path = "/warehouses/{id}/",
    tag = "Warehouses",
    params(("id" = i64, Path, description = "ID do armazém")),
    responses(
        (status = 204, description = "Armazém removido"),
        (status = 404, description = "Armazém não encontrado")
    ),
    security(("api_token" = []))
)]
pub async fn delete_warehouse(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    PathParam(warehouse_id): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .warehouse_repo
        .delete(warehouse_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
