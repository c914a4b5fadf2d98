// src/handlers/catalog.rs
//
// Tabelas de atributos: qualquer usuário autenticado lê,
// só superusuário cria ou remove.

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
    models::catalog::{
        CatalogTable, ClothesType, Color, CreateClothesTypePayload, CreateColorPayload,
        CreateMaterialPayload, CreateSizePayload, CreateStatusPayload, Material, Size, Status,
    },
};

async fn delete_entry(
    app_state: &AppState,
    locale: &Locale,
    table: CatalogTable,
    id: i64,
) -> Result<StatusCode, ApiError> {
    app_state
        .catalog_repo
        .delete(table, id)
        .await
        .map_err(|e| e.to_api_error(locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

fn validate_payload<T: Validate>(payload: &T, app_state: &AppState, locale: &Locale) -> Result<(), ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(locale, &app_state.i18n_store))
}

// ---
// Materiais
// ---

#[utoipa::path(
    get,
    path = "/materials/",
    tag = "Catalog",
    responses((status = 200, description = "Materiais", body = Vec<Material>)),
    security(("api_token" = []))
)]
pub async fn list_materials(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<Material>>, ApiError> {
    let materials = app_state
        .catalog_repo
        .list_materials()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(materials))
}

#[utoipa::path(
    post,
    path = "/materials/",
    tag = "Catalog",
    request_body = CreateMaterialPayload,
    responses(
        (status = 201, description = "Material criado", body = Material),
        (status = 400, description = "Nome duplicado ou inválido")
    ),
    security(("api_token" = []))
)]
pub async fn create_material(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    JsonBody(payload): JsonBody<CreateMaterialPayload>,
) -> Result<impl IntoResponse, ApiError> {
    validate_payload(&payload, &app_state, &locale)?;

    let material = app_state
        .catalog_repo
        .create_material(&payload.name)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(material)))
}

#[utoipa::path(
    delete,
    path = "/materials/{id}/",
    tag = "Catalog",
    params(("id" = i64, Path, description = "ID do material")),
    responses((status = 204, description = "Removido"), (status = 404, description = "Não encontrado")),
    security(("api_token" = []))
)]
pub async fn delete_material(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, ApiError> {
    delete_entry(&app_state, &locale, CatalogTable::Material, id).await
}

// ---
// Cores
// ---

#[utoipa::path(
    get,
    path = "/colors/",
    tag = "Catalog",
    responses((status = 200, description = "Cores", body = Vec<Color>)),
    security(("api_token" = []))
)]
pub async fn list_colors(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<Color>>, ApiError> {
    let colors = app_state
        .catalog_repo
        .list_colors()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(colors))
}

#[utoipa::path(
    post,
    path = "/colors/",
    tag = "Catalog",
    request_body = CreateColorPayload,
    responses(
        (status = 201, description = "Cor criada", body = Color),
        (status = 400, description = "Nome duplicado ou inválido")
    ),
    security(("api_token" = []))
)]
pub async fn create_color(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    JsonBody(payload): JsonBody<CreateColorPayload>,
) -> Result<impl IntoResponse, ApiError> {
    validate_payload(&payload, &app_state, &locale)?;

    let color = app_state
        .catalog_repo
        .create_color(&payload.name, &payload.code)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(color)))
}

#[utoipa::path(
    delete,
    path = "/colors/{id}/",
    tag = "Catalog",
    params(("id" = i64, Path, description = "ID da cor")),
    responses((status = 204, description = "Removida"), (status = 404, description = "Não encontrada")),
    security(("api_token" = []))
)]
pub async fn delete_color(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, ApiError> {
    delete_entry(&app_state, &locale, CatalogTable::Color, id).await
}

// ---
// Tamanhos
// ---

#[utoipa::path(
    get,
    path = "/sizes/",
    tag = "Catalog",
    responses((status = 200, description = "Tamanhos", body = Vec<Size>)),
    security(("api_token" = []))
)]
pub async fn list_sizes(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<Size>>, ApiError> {
    let sizes = app_state
        .catalog_repo
        .list_sizes()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(sizes))
}

#[utoipa::path(
    post,
    path = "/sizes/",
    tag = "Catalog",
    request_body = CreateSizePayload,
    responses((status = 201, description = "Tamanho criado", body = Size)),
    security(("api_token" = []))
)]
pub async fn create_size(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    JsonBody(payload): JsonBody<CreateSizePayload>,
) -> Result<impl IntoResponse, ApiError> {
    validate_payload(&payload, &app_state, &locale)?;

    let size = app_state
        .catalog_repo
        .create_size(&payload.name)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(size)))
}

#[utoipa::path(
    delete,
    path = "/sizes/{id}/",
    tag = "Catalog",
    params(("id" = i64, Path, description = "ID do tamanho")),
    responses((status = 204, description = "Removido"), (status = 404, description = "Não encontrado")),
    security(("api_token" = []))
)]
pub async fn delete_size(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, ApiError> {
    delete_entry(&app_state, &locale, CatalogTable::Size, id).await
}

// ---
// Status
// ---

#[utoipa::path(
    get,
    path = "/statuses/",
    tag = "Catalog",
    responses((status = 200, description = "Status", body = Vec<Status>)),
    security(("api_token" = []))
)]
pub async fn list_statuses(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<Status>>, ApiError> {
    let statuses = app_state
        .catalog_repo
        .list_statuses()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(statuses))
}

#[utoipa::path(
    post,
    path = "/statuses/",
    tag = "Catalog",
    request_body = CreateStatusPayload,
    responses(
        (status = 201, description = "Status criado", body = Status),
        (status = 400, description = "ID já usado ou dados inválidos")
    ),
    security(("api_token" = []))
)]
pub async fn create_status(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    JsonBody(payload): JsonBody<CreateStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    validate_payload(&payload, &app_state, &locale)?;

    let status = app_state
        .catalog_repo
        .create_status(payload.id, &payload.name)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(status)))
}

#[utoipa::path(
    delete,
    path = "/statuses/{id}/",
    tag = "Catalog",
    params(("id" = i64, Path, description = "ID do status")),
    responses((status = 204, description = "Removido"), (status = 404, description = "Não encontrado")),
    security(("api_token" = []))
)]
pub async fn delete_status(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, ApiError> {
    delete_entry(&app_state, &locale, CatalogTable::Status, id).await
}

// ---
// Tipos de roupa
// ---

#[utoipa::path(
    get,
    path = "/types/",
    tag = "Catalog",
    responses((status = 200, description = "Tipos de roupa", body = Vec<ClothesType>)),
    security(("api_token" = []))
)]
pub async fn list_types(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<ClothesType>>, ApiError> {
    let types = app_state
        .catalog_repo
        .list_types()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(types))
}

#[utoipa::path(
    post,
    path = "/types/",
    tag = "Catalog",
    request_body = CreateClothesTypePayload,
    responses(
        (status = 201, description = "Tipo criado", body = ClothesType),
        (status = 400, description = "Nome duplicado ou inválido")
    ),
    security(("api_token" = []))
)]
pub async fn create_type(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    JsonBody(payload): JsonBody<CreateClothesTypePayload>,
) -> Result<impl IntoResponse, ApiError> {
    validate_payload(&payload, &app_state, &locale)?;

    let clothes_type = app_state
        .catalog_repo
        .create_type(&payload.name, payload.image.as_deref(), payload.comments.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(clothes_type)))
}

#[utoipa::path(
    delete,
    path = "/types/{id}/",
    tag = "Catalog",
    params(("id" = i64, Path, description = "ID do tipo")),
    responses((status = 204, description = "Removido"), (status = 404, description = "Não encontrado")),
    security(("api_token" = []))
)]
pub async fn delete_type(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, ApiError> {
    delete_entry(&app_state, &locale, CatalogTable::ClothesType, id).await
}
