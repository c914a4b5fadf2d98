// src/handlers/auth.rs

use axum::{extract::State, http::{HeaderMap, StatusCode}, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        extract::JsonBody,
    },
    config::AppState,
    middleware::i18n::Locale,
    models::auth::{AuthResponse, LoginPayload, SignupPayload, User},
};

// ---
// Handler: signup
// ---
#[utoipa::path(
    post,
    path = "/users/signup/",
    tag = "Auth",
    request_body = SignupPayload,
    responses(
        (status = 201, description = "Usuário criado", body = User),
        (status = 400, description = "Usuário já existe ou dados inválidos")
    )
)]
pub async fn signup(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<SignupPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let user = app_state
        .auth_service
        .signup(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(user)))
}

// ---
// Handler: login (e o equivalente /api-token-auth/)
// ---
#[utoipa::path(
    post,
    path = "/users/login/",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Token do usuário", body = AuthResponse),
        (status = 400, description = "Credenciais ausentes ou inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<LoginPayload>,
) -> Result<Json<AuthResponse>, ApiError> {
    let token = app_state
        .auth_service
        .login(payload.username.as_deref(), payload.password.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(AuthResponse { token }))
}

#[utoipa::path(
    post,
    path = "/api-token-auth/",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Token do usuário", body = AuthResponse),
        (status = 400, description = "Credenciais ausentes ou inválidas")
    )
)]
pub async fn obtain_auth_token(
    state: State<AppState>,
    locale: Locale,
    payload: JsonBody<LoginPayload>,
) -> Result<Json<AuthResponse>, ApiError> {
    login(state, locale, payload).await
}

// ---
// Handler: verify_auth
// ---
// Fica fora do guardião: um token inválido aqui é 400, não 401.
#[utoipa::path(
    get,
    path = "/users/verify_auth/",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuário dono do token", body = User),
        (status = 400, description = "Token ausente ou inválido")
    ),
    security(("api_token" = []))
)]
pub async fn verify_auth(
    State(app_state): State<AppState>,
    locale: Locale,
    headers: HeaderMap,
) -> Result<Json<User>, ApiError> {
    let user = app_state
        .auth_service
        .get_user_by_auth(&headers)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?
        .ok_or_else(|| AppError::UnresolvedToken.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(user))
}
