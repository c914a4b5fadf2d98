// src/middleware/auth.rs

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::User,
};

// Guardião das rotas protegidas: resolve o token e guarda o usuário
// nos "extensions" da requisição.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = app_state
        .auth_service
        .get_user_by_auth(request.headers())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?
        .ok_or_else(|| AppError::NotAuthenticated.to_api_error(&locale, &app_state.i18n_store))?;

    request.extensions_mut().insert(AuthenticatedUser(user));
    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthenticatedUser>() {
            Some(user) => Ok(user.clone()),
            None => Err(reject(parts, state, AppError::NotAuthenticated)),
        }
    }
}

// Mesmo que `AuthenticatedUser`, mas só deixa passar superusuários (401 para o resto).
#[derive(Debug, Clone)]
pub struct RequireSuperuser(pub User);

impl<S> FromRequestParts<S> for RequireSuperuser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(parts, state).await?;

        if !user.is_superuser {
            tracing::debug!(user_id = user.id, "Acesso negado: não é superusuário");
            return Err(reject(parts, state, AppError::SuperuserRequired));
        }
        Ok(RequireSuperuser(user))
    }
}

fn reject<S>(parts: &Parts, state: &S, error: AppError) -> ApiError
where
    AppState: FromRef<S>,
{
    let app_state = AppState::from_ref(state);
    let locale = Locale::from_headers(&parts.headers);
    error.to_api_error(&locale, &app_state.i18n_store)
}
