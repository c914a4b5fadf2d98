// src/models/auth.rs

use std::collections::HashMap;

use axum::http::HeaderValue;
use axum_extra::headers::authorization::Credentials;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::common::error::AppError;

// Representa um usuário vindo do banco de dados (já com o telefone do
// fornecedor, quando existir).
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "warehouse01")]
    pub username: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password: String,

    pub is_superuser: bool,
    pub is_staff: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,

    #[schema(example = "13800138000")]
    pub tel: Option<String>,
}

// Token persistente no formato "Authorization: Token <key>".
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthToken {
    pub key: String,
    pub user_id: i64,
}

// Credencial do cabeçalho "Authorization: Token <key>".
// O prefixo já foi conferido (sem diferenciar maiúsculas) por `Authorization<C>`.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenKey(pub String);

impl Credentials for TokenKey {
    const SCHEME: &'static str = "Token";

    fn decode(value: &HeaderValue) -> Option<Self> {
        let key = value.to_str().ok()?.get(Self::SCHEME.len()..)?.trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return None;
        }
        Some(TokenKey(key.to_string()))
    }

    fn encode(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("{} {}", Self::SCHEME, self.0))
            .unwrap_or_else(|_| HeaderValue::from_static(Self::SCHEME))
    }
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    let valid = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if !valid {
        let mut err = ValidationError::new("username_charset");
        err.message = Some("Use only letters, digits and @/./+/-/_ characters.".into());
        return Err(err);
    }
    Ok(())
}

// Dados para registro de um novo usuário.
// Flags de papel (is_superuser/is_staff) não são aceitas aqui.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupPayload {
    #[validate(
        length(min = 1, max = 150, message = "Username must have between 1 and 150 characters."),
        custom(function = "validate_username")
    )]
    #[schema(example = "warehouse01")]
    pub username: String,

    #[validate(length(min = 1, max = 128, message = "Password must have between 1 and 128 characters."))]
    pub password: String,

    #[validate(length(min = 1, max = 12, message = "Phone must have between 1 and 12 characters."))]
    #[schema(example = "13800138000")]
    pub tel: Option<String>,
}

// Login e obtenção de token. Os campos são opcionais para podermos responder
// "usuário e senha são obrigatórios" em vez de um erro de parsing.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginPayload {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserPayload {
    #[validate(length(min = 1, max = 128, message = "Password must have between 1 and 128 characters."))]
    pub password: Option<String>,

    #[validate(length(min = 1, max = 12, message = "Phone must have between 1 and 12 characters."))]
    pub tel: Option<String>,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    #[schema(example = "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b")]
    pub token: String,
}

// Filtros aceitos por GET /users/get/
#[derive(Debug, Default, PartialEq)]
pub struct UserFilter {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub is_superuser: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_active: Option<bool>,
}

fn parse_flag(key: &str, value: &str) -> Result<bool, AppError> {
    match value.trim_end_matches('/').to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Ok(true),
        "false" | "f" | "0" => Ok(false),
        _ => Err(AppError::InvalidFilterValue(key.to_string())),
    }
}

impl UserFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let mut filter = UserFilter::default();
        for (key, value) in params {
            match key.as_str() {
                "id" => {
                    let id = value
                        .parse()
                        .map_err(|_| AppError::InvalidFilterValue(key.clone()))?;
                    filter.id = Some(id);
                }
                "username" => filter.username = Some(value.trim_end_matches('/').to_string()),
                "is_superuser" => filter.is_superuser = Some(parse_flag(key, value)?),
                "is_staff" => filter.is_staff = Some(parse_flag(key, value)?),
                "is_active" => filter.is_active = Some(parse_flag(key, value)?),
                _ => return Err(AppError::UnsupportedFilter(key.clone())),
            }
        }
        Ok(filter)
    }
}
