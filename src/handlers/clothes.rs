// src/handlers/clothes.rs

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
        extract::{JsonBody, PathParam, QueryParams},
    },
    config::AppState,
    middleware::{
        auth::{AuthenticatedUser, RequireSuperuser},
        i18n::Locale,
    },
    models::clothes::{
        Batch, Clothes, ClothesFilter, ClothesReturn, CreateBatchPayload, CreateClothesPayload,
        CreateReprintPayload, CreateReturnPayload, Reprint, UpdateClothesPayload,
    },
};

// ---
// Roupas (só superusuário)
// ---

#[utoipa::path(
    get,
    path = "/clothes/",
    tag = "Clothes",
    params(ClothesFilter),
    responses(
        (status = 200, description = "Roupas em ordem de cadastro", body = Vec<Clothes>),
        (status = 401, description = "Não é superusuário")
    ),
    security(("api_token" = []))
)]
pub async fn list_clothes(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    QueryParams(filter): QueryParams<ClothesFilter>,
) -> Result<Json<Vec<Clothes>>, ApiError> {
    let clothes = app_state
        .clothes_repo
        .list(&filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(clothes))
}

#[utoipa::path(
    get,
    path = "/clothes/{id}/",
    tag = "Clothes",
    params(("id" = i64, Path, description = "ID da roupa")),
    responses(
        (status = 200, description = "Roupa", body = Clothes),
        (status = 404, description = "Roupa não encontrada")
    ),
    security(("api_token" = []))
)]
pub async fn get_clothes(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    PathParam(clothes_id): PathParam<i64>,
) -> Result<Json<Clothes>, ApiError> {
    let clothes = app_state
        .clothes_repo
        .find_by_id(&app_state.db_pool, clothes_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?
        .ok_or_else(|| AppError::NotFound("clothes").to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(clothes))
}

#[utoipa::path(
    post,
    path = "/clothes/",
    tag = "Clothes",
    request_body = CreateClothesPayload,
    responses(
        (status = 201, description = "Roupa cadastrada", body = Clothes),
        (status = 400, description = "RFID duplicado, referência inválida ou dados inválidos")
    ),
    security(("api_token" = []))
)]
pub async fn create_clothes(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    JsonBody(payload): JsonBody<CreateClothesPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let clothes = app_state
        .clothes_service
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(clothes)))
}

// PUT e PATCH compartilham o handler: os dois são parciais.
#[utoipa::path(
    put,
    path = "/clothes/{id}/",
    tag = "Clothes",
    request_body = UpdateClothesPayload,
    params(("id" = i64, Path, description = "ID da roupa")),
    responses(
        (status = 200, description = "Roupa atualizada", body = Clothes),
        (status = 404, description = "Roupa não encontrada")
    ),
    security(("api_token" = []))
)]
pub async fn update_clothes(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    PathParam(clothes_id): PathParam<i64>,
    JsonBody(payload): JsonBody<UpdateClothesPayload>,
) -> Result<Json<Clothes>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let clothes = app_state
        .clothes_repo
        .update(clothes_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(clothes))
}

#[utoipa::path(
    delete,
    path = "/clothes/{id}/",
    tag = "Clothes",
    params(("id" = i64, Path, description = "ID da roupa")),
    responses(
        (status = 204, description = "Roupa removida"),
        (status = 404, description = "Roupa não encontrada")
    ),
    security(("api_token" = []))
)]
pub async fn delete_clothes(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    PathParam(clothes_id): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .clothes_repo
        .delete(clothes_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Reimpressões
// ---

#[utoipa::path(
    get,
    path = "/clothes/{id}/reprints/",
    tag = "Reprints",
    params(("id" = i64, Path, description = "ID da roupa")),
    responses(
        (status = 200, description = "Reimpressões da roupa", body = Vec<Reprint>),
        (status = 404, description = "Roupa não encontrada")
    ),
    security(("api_token" = []))
)]
pub async fn list_reprints(
    State(app_state): State<AppState>,
    locale: Locale,
    PathParam(clothes_id): PathParam<i64>,
) -> Result<Json<Vec<Reprint>>, ApiError> {
    let reprints = app_state
        .clothes_service
        .list_reprints(clothes_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(reprints))
}

#[utoipa::path(
    post,
    path = "/clothes/{id}/reprints/",
    tag = "Reprints",
    request_body = CreateReprintPayload,
    params(("id" = i64, Path, description = "ID da roupa")),
    responses(
        (status = 201, description = "Reimpressão registrada", body = Reprint),
        (status = 400, description = "RFID já usado ou dados inválidos"),
        (status = 404, description = "Roupa não encontrada")
    ),
    security(("api_token" = []))
)]
pub async fn create_reprint(
    State(app_state): State<AppState>,
    locale: Locale,
    PathParam(clothes_id): PathParam<i64>,
    JsonBody(payload): JsonBody<CreateReprintPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let reprint = app_state
        .clothes_service
        .reprint(clothes_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(reprint)))
}

// ---
// Devoluções
// ---

#[utoipa::path(
    get,
    path = "/returns/",
    tag = "Returns",
    responses((status = 200, description = "Devoluções, mais recentes primeiro", body = Vec<ClothesReturn>)),
    security(("api_token" = []))
)]
pub async fn list_returns(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<ClothesReturn>>, ApiError> {
    let returns = app_state
        .clothes_repo
        .list_returns()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(returns))
}

#[utoipa::path(
    post,
    path = "/returns/",
    tag = "Returns",
    request_body = CreateReturnPayload,
    responses(
        (status = 201, description = "Devolução registrada", body = ClothesReturn),
        (status = 400, description = "Referência inválida ou dados inválidos")
    ),
    security(("api_token" = []))
)]
pub async fn create_return(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<CreateReturnPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let clothes_return = app_state
        .clothes_repo
        .create_return(&payload, chrono::Utc::now())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(clothes_return)))
}

// ---
// Lotes
// ---

#[utoipa::path(
    get,
    path = "/batches/",
    tag = "Batches",
    responses((status = 200, description = "Lotes", body = Vec<Batch>)),
    security(("api_token" = []))
)]
pub async fn list_batches(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<Batch>>, ApiError> {
    let batches = app_state
        .clothes_repo
        .list_batches()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(batches))
}

// O dono do lote é sempre quem faz a requisição.
#[utoipa::path(
    post,
    path = "/batches/",
    tag = "Batches",
    request_body = CreateBatchPayload,
    responses(
        (status = 201, description = "Lote criado", body = Batch),
        (status = 400, description = "Nome duplicado, referência inválida ou dados inválidos")
    ),
    security(("api_token" = []))
)]
pub async fn create_batch(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    JsonBody(payload): JsonBody<CreateBatchPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let batch = app_state
        .clothes_repo
        .create_batch(&payload, user.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(batch)))
}

#[utoipa::path(
    delete,
    path = "/batches/{id}/",
    tag = "Batches",
    params(("id" = i64, Path, description = "ID do lote")),
    responses(
        (status = 204, description = "Lote removido"),
        (status = 404, description = "Lote não encontrado")
    ),
    security(("api_token" = []))
)]
pub async fn delete_batch(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    PathParam(batch_id): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .clothes_repo
        .delete_batch(batch_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
