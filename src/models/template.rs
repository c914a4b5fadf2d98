// src/models/template.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

pub const DEFAULT_TEMPLATE_NAME: &str = "吊牌";

// Linha da tabela 'templates' (sem os usuários).
#[derive(Debug, Clone, FromRow)]
pub struct TemplateRow {
    pub id: i64,
    pub name: String,
    pub body: String,
}

// Modelo de impressão de etiqueta, compartilhado com vários usuários.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Template {
    pub id: i64,

    #[schema(example = "吊牌")]
    pub name: String,

    pub body: String,

    // IDs dos usuários que podem usar o modelo
    pub users: Vec<i64>,
}

impl Template {
    pub fn from_row(row: TemplateRow, users: Vec<i64>) -> Self {
        Self { id: row.id, name: row.name, body: row.body, users }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTemplatePayload {
    #[validate(length(min = 1, max = 20, message = "Name must have between 1 and 20 characters."))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Body is required."))]
    pub body: String,

    #[serde(default)]
    pub users: Vec<i64>,
}

// `users`, quando presente, substitui o conjunto inteiro.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTemplatePayload {
    #[validate(length(min = 1, max = 20, message = "Name must have between 1 and 20 characters."))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Body is required."))]
    pub body: Option<String>,

    pub users: Option<Vec<i64>>,
}
