// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Todos os erros da aplicação. Os handlers convertem para `ApiError`
// (já traduzido) com `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Corpo da requisição inválido: {0}")]
    MalformedBody(String),

    #[error("Query string inválida: {0}")]
    MalformedQuery(String),

    #[error("Parâmetro de rota inválido: {0}")]
    MalformedPath(String),

    #[error("Usuário já existe")]
    UsernameAlreadyExists,

    #[error("Usuário e senha são obrigatórios")]
    CredentialsRequired,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido ou ausente")]
    NotAuthenticated,

    // verify_auth responde 400 (e não 401) quando o token não resolve
    #[error("Token não corresponde a nenhum usuário ativo")]
    UnresolvedToken,

    #[error("Acesso restrito a superusuários")]
    SuperuserRequired,

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    #[error("Nenhum usuário encontrado")]
    NoUsersFound,

    #[error("Valor duplicado em '{0}'")]
    AlreadyExists(String),

    #[error("Referência inválida em '{0}'")]
    InvalidReference(String),

    #[error("Filtro não suportado: '{0}'")]
    UnsupportedFilter(String),

    #[error("Valor inválido para o filtro '{0}'")]
    InvalidFilterValue(String),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),
}

// O erro que de fato vai para o cliente.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl ApiError {
    fn new(status: StatusCode, error: String) -> Self {
        Self { status, error, details: None }
    }

    fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();
        let t = |key: &str| store.translate(lang, key, &[]);

        match self {
            AppError::ValidationError(errors) => {
                ApiError::new(StatusCode::BAD_REQUEST, t("error.validation"))
                    .with_details(validation_details(errors))
            }
            AppError::MalformedBody(reason) => {
                ApiError::new(StatusCode::BAD_REQUEST, t("error.malformed_body"))
                    .with_details(json!({ "body": [reason] }))
            }
            AppError::MalformedQuery(reason) => {
                ApiError::new(StatusCode::BAD_REQUEST, t("error.malformed_query"))
                    .with_details(json!({ "query": [reason] }))
            }
            AppError::MalformedPath(reason) => {
                ApiError::new(StatusCode::BAD_REQUEST, t("error.malformed_path"))
                    .with_details(json!({ "path": [reason] }))
            }
            AppError::UsernameAlreadyExists => {
                ApiError::new(StatusCode::BAD_REQUEST, t("error.username_taken"))
                    .with_details(json!({ "username": [t("error.username_taken")] }))
            }
            AppError::CredentialsRequired => {
                ApiError::new(StatusCode::BAD_REQUEST, t("error.credentials_required"))
            }
            AppError::InvalidCredentials => {
                ApiError::new(StatusCode::BAD_REQUEST, t("error.invalid_credentials"))
            }
            AppError::NotAuthenticated => {
                ApiError::new(StatusCode::UNAUTHORIZED, t("error.not_authenticated"))
            }
            AppError::UnresolvedToken => {
                ApiError::new(StatusCode::BAD_REQUEST, t("error.not_authenticated"))
            }
            AppError::SuperuserRequired => {
                ApiError::new(StatusCode::UNAUTHORIZED, t("error.superuser_required"))
            }
            AppError::NotFound(entity) => {
                let entity_name = store.translate(lang, &format!("entity.{entity}"), &[]);
                ApiError::new(
                    StatusCode::NOT_FOUND,
                    store.translate(lang, "error.not_found", &[("entity", entity_name.as_str())]),
                )
            }
            AppError::NoUsersFound => ApiError::new(StatusCode::NOT_FOUND, t("error.no_users_found")),
            AppError::AlreadyExists(field) => {
                let message = store.translate(lang, "error.already_exists", &[("field", field.as_str())]);
                ApiError::new(StatusCode::BAD_REQUEST, message.clone())
                    .with_details(json!({ field.as_str(): [message] }))
            }
            AppError::InvalidReference(field) => {
                let message = store.translate(lang, "error.invalid_reference", &[("field", field.as_str())]);
                ApiError::new(StatusCode::BAD_REQUEST, message.clone())
                    .with_details(json!({ field.as_str(): [message] }))
            }
            AppError::UnsupportedFilter(key) => ApiError::new(
                StatusCode::BAD_REQUEST,
                store.translate(lang, "error.unsupported_filter", &[("field", key.as_str())]),
            ),
            AppError::InvalidFilterValue(key) => ApiError::new(
                StatusCode::BAD_REQUEST,
                store.translate(lang, "error.invalid_filter_value", &[("field", key.as_str())]),
            ),

            // Banco, bcrypt e afins viram 500; o detalhe fica só no log.
            e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, t("error.internal"))
            }
        }
    }
}

// { "campo": ["mensagem", ...] }, no formato que o frontend já consome.
fn validation_details(errors: &validator::ValidationErrors) -> Value {
    let mut details = Map::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<Value> = field_errors
            .iter()
            .map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                Value::String(message)
            })
            .collect();
        details.insert(field.to_string(), Value::Array(messages));
    }
    Value::Object(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    fn store() -> I18nStore {
        I18nStore::load().unwrap()
    }

    #[test]
    fn validation_errors_become_field_details() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("length");
        err.message = Some("too long".into());
        errors.add("name", err);

        let api = AppError::ValidationError(errors).to_api_error(&Locale::default(), &store());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.details.unwrap(), json!({ "name": ["too long"] }));
    }

    #[test]
    fn auth_failures_map_to_unauthorized() {
        let store = store();
        let locale = Locale::default();
        assert_eq!(
            AppError::NotAuthenticated.to_api_error(&locale, &store).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::SuperuserRequired.to_api_error(&locale, &store).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::InvalidCredentials.to_api_error(&locale, &store).status,
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn not_found_names_the_entity() {
        let api = AppError::NotFound("template").to_api_error(&Locale::default(), &store());
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.error, "Template not found.");
    }

    #[test]
    fn internal_errors_hide_details() {
        let api = AppError::DatabaseError(sqlx::Error::RowNotFound)
            .to_api_error(&Locale::default(), &store());
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(api.details.is_none());
    }
}
