// src/handlers/templates.rs

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
    models::template::{CreateTemplatePayload, Template, UpdateTemplatePayload},
};

#[utoipa::path(
    get,
    path = "/templates/",
    tag = "Templates",
    responses(
        (status = 200, description = "Modelos de etiqueta", body = Vec<Template>),
        (status = 401, description = "Não é superusuário")
    ),
    security(("api_token" = []))
)]
pub async fn list_templates(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
) -> Result<Json<Vec<Template>>, ApiError> {
    let templates = app_state
        .template_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(templates))
}

#[utoipa::path(
    post,
    path = "/templates/",
    tag = "Templates",
    request_body = CreateTemplatePayload,
    responses(
        (status = 201, description = "Modelo criado", body = Template),
        (status = 400, description = "Nome duplicado, usuário inexistente ou dados inválidos"),
        (status = 401, description = "Não é superusuário")
    ),
    security(("api_token" = []))
)]
pub async fn create_template(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    JsonBody(payload): JsonBody<CreateTemplatePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let template = app_state
        .template_service
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(template)))
}

#[utoipa::path(
    put,
    path = "/templates/{id}/",
    tag = "Templates",
    request_body = UpdateTemplatePayload,
    params(("id" = i64, Path, description = "ID do modelo")),
    responses(
        (status = 200, description = "Modelo atualizado", body = Template),
        (status = 404, description = "Modelo não encontrado")
    ),
    security(("api_token" = []))
)]
pub async fn update_template(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    PathParam(template_id): PathParam<i64>,
    JsonBody(payload): JsonBody<UpdateTemplatePayload>,
) -> Result<Json<Template>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let template = app_state
        .template_service
        .update(template_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(template))
}

#[utoipa::path(
    delete,
    path = "/templates/{id}/",
    tag = "Templates",
    params(("id" = i64, Path, description = "ID do modelo")),
    responses(
        (status = 204, description = "Modelo removido"),
        (status = 404, description = "Modelo não encontrado")
    ),
    security(("api_token" = []))
)]
pub async fn delete_template(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireSuperuser,
    PathParam(template_id): PathParam<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .template_service
        .delete(template_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
