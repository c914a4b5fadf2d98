// src/common/extract.rs

use axum::{
    extract::{FromRef, FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
};

// Igual ao `Json` do axum, mas um corpo inválido vira 400 no nosso formato
// de erro (o axum responderia 422 em texto puro).
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_headers(req.headers());

        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                let app_state = AppState::from_ref(state);
                Err(AppError::MalformedBody(rejection.body_text())
                    .to_api_error(&locale, &app_state.i18n_store))
            }
        }
    }
}

// Query string no nosso formato de erro (`?is_printed=talvez` vira 400 em JSON).
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryParams(value)),
            Err(rejection) => {
                let locale = Locale::from_headers(&parts.headers);
                let app_state = AppState::from_ref(state);
                Err(AppError::MalformedQuery(rejection.body_text())
                    .to_api_error(&locale, &app_state.i18n_store))
            }
        }
    }
}

// Parâmetro de rota; `/clothes/abc/` vira 400 em JSON.
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(PathParam(value)),
            Err(rejection) => {
                let locale = Locale::from_headers(&parts.headers);
                let app_state = AppState::from_ref(state);
                // Parâmetro ausente na rota é erro nosso, não do cliente
                let error = if rejection.status().is_server_error() {
                    AppError::InternalServerError(anyhow::anyhow!(rejection.body_text()))
                } else {
                    AppError::MalformedPath(rejection.body_text())
                };
                Err(error.to_api_error(&locale, &app_state.i18n_store))
            }
        }
    }
}
