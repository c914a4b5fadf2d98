// src/handlers/users.rs

use std::collections::HashMap;

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
    models::auth::{UpdateUserPayload, User, UserFilter},
};

// ---
// Handler: get_users
// ---
// Filtros: id, username, is_superuser, is_staff, is_active.
// Sem filtros devolve todos.
#[utoipa::path(
    get,
    path = "/users/get/",
    tag = "Users",
    params(
        ("id" = Option<i64>, Query, description = "ID do usuário"),
        ("username" = Option<String>, Query, description = "Nome de usuário exato"),
        ("is_superuser" = Option<bool>, Query, description = "true/false/t/f/1/0"),
        ("is_staff" = Option<bool>, Query, description = "true/false/t/f/1/0"),
        ("is_active" = Option<bool>, Query, description = "true/false/t/f/1/0")
    ),
    responses(
        (status = 200, description = "Usuários encontrados", body = Vec<User>),
        (status = 400, description = "Filtro desconhecido ou valor inválido"),
        (status = 401, description = "Não autenticado ou não é superusuário"),
        (status = 404, description = "Nenhum usuário encontrado")
    ),
    security(("api_token" = []))
)]
pub async fn get_users(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    QueryParams(params): QueryParams<HashMap<String, String>>,
) -> Result<Json<Vec<User>>, ApiError> {
    let filter = UserFilter::from_params(&params)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let users = app_state
        .auth_service
        .find_users(&filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(users))
}

// ---
// Handler: update_user
// ---
#[utoipa::path(
    post,
    path = "/users/{id}/update/",
    tag = "Users",
    request_body = UpdateUserPayload,
    params(("id" = i64, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário atualizado", body = User),
        (status = 401, description = "Só o próprio usuário ou um superusuário"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_token" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(actor): AuthenticatedUser,
    PathParam(user_id): PathParam<i64>,
    JsonBody(payload): JsonBody<UpdateUserPayload>,
) -> Result<Json<User>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let user = app_state
        .auth_service
        .update_user(&actor, user_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(user))
}

// ---
// Handler: delete_user (desativa)
// ---
#[utoipa::path(
    delete,
    path = "/users/{id}/delete/",
    tag = "Users",
    params(("id" = i64, Path, description = "ID do usuário")),
    responses(
        (status = 204, description = "Usuário desativado"),
        (status = 401, description = "Não é superusuário"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_token" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    PathParam(user_id): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .auth_service
        .deactivate_user(user_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
