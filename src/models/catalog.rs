// src/models/catalog.rs
//
// Tabelas de atributos das roupas: material, cor, tamanho, status e tipo.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Material {
    pub id: i64,
    #[schema(example = "全棉")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Color {
    pub id: i64,
    #[schema(example = "红色")]
    pub name: String,
    #[schema(example = "#FF0000")]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Size {
    pub id: i64,
    #[schema(example = "XL")]
    pub name: String,
}

// O ID do status é definido pelo cliente (códigos fixos do negócio).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Status {
    pub id: i64,
    #[schema(example = "在库")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClothesType {
    pub id: i64,
    #[schema(example = "衬衫")]
    pub name: String,
    pub image: Option<String>,
    pub comments: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaterialPayload {
    #[validate(length(min = 1, max = 15, message = "Name must have between 1 and 15 characters."))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateColorPayload {
    #[validate(length(min = 1, max = 5, message = "Name must have between 1 and 5 characters."))]
    pub name: String,

    #[validate(length(max = 10, message = "Code must have at most 10 characters."))]
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSizePayload {
    #[validate(length(min = 1, max = 5, message = "Name must have between 1 and 5 characters."))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStatusPayload {
    #[validate(range(min = -32768, max = 32767, message = "Status id must fit a small integer."))]
    pub id: i64,

    #[validate(length(min = 1, max = 5, message = "Name must have between 1 and 5 characters."))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClothesTypePayload {
    #[validate(length(min = 1, max = 20, message = "Name must have between 1 and 20 characters."))]
    pub name: String,

    #[validate(length(max = 1000, message = "Image path must have at most 1000 characters."))]
    pub image: Option<String>,

    #[validate(length(max = 50, message = "Comments must have at most 50 characters."))]
    pub comments: Option<String>,
}

// Tabelas com DELETE genérico. O nome da tabela nunca vem do cliente.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogTable {
    Material,
    Color,
    Size,
    Status,
    ClothesType,
}

impl CatalogTable {
    pub fn table_name(self) -> &'static str {
        match self {
            CatalogTable::Material => "materials",
            CatalogTable::Color => "colors",
            CatalogTable::Size => "sizes",
            CatalogTable::Status => "statuses",
            CatalogTable::ClothesType => "clothes_types",
        }
    }

    // Chave usada nas mensagens de "não encontrado".
    pub fn entity(self) -> &'static str {
        match self {
            CatalogTable::Material => "material",
            CatalogTable::Color => "color",
            CatalogTable::Size => "size",
            CatalogTable::Status => "status",
            CatalogTable::ClothesType => "clothes_type",
        }
    }
}
