// src/models/clothes.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

// --- 1. Roupa (item principal do estoque) ---
// As chaves estrangeiras saem com o nome da entidade ("color", "size"...).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Clothes {
    #[schema(example = 583129746)]
    pub id: i64,

    pub rfid: Option<i64>,

    #[schema(example = "纯棉T恤")]
    pub name: String,

    // Preço de compra
    pub price: i32,

    #[serde(rename = "color")]
    pub color_id: Option<i64>,
    #[serde(rename = "material")]
    pub material_id: Option<i64>,
    #[serde(rename = "size")]
    pub size_id: i64,

    pub is_printed: bool,
    pub is_reprinted: bool,

    #[serde(rename = "status")]
    pub status_id: Option<i64>,
    #[serde(rename = "type")]
    pub type_id: i64,

    // Data de entrada no armazém
    pub indate: NaiveDate,
    pub created: DateTime<Utc>,

    #[serde(rename = "warehouse")]
    pub warehouse_id: Option<i64>,

    pub comments: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClothesPayload {
    // As etiquetas RFID gravam 32 bits com sinal.
    #[validate(range(min = 1, max = 2147483647, message = "RFID must be a positive 32-bit integer."))]
    pub rfid: Option<i64>,

    #[validate(length(min = 1, max = 30, message = "Name must have between 1 and 30 characters."))]
    pub name: String,

    #[validate(range(min = 0, max = 32767, message = "Price must be between 0 and 32767."))]
    pub price: i32,

    pub color: Option<i64>,
    pub material: Option<i64>,
    pub size: i64,
    pub status: Option<i64>,

    #[serde(rename = "type")]
    pub clothes_type: i64,

    pub warehouse: Option<i64>,

    // Se ausente, usa a data de hoje
    pub indate: Option<NaiveDate>,

    #[serde(default)]
    pub is_printed: bool,

    #[validate(length(max = 200, message = "Comments must have at most 200 characters."))]
    #[serde(default)]
    pub comments: String,
}

// PUT e PATCH: campos ausentes ficam como estão.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateClothesPayload {
    #[validate(range(min = 1, max = 2147483647, message = "RFID must be a positive 32-bit integer."))]
    pub rfid: Option<i64>,

    #[validate(length(min = 1, max = 30, message = "Name must have between 1 and 30 characters."))]
    pub name: Option<String>,

    #[validate(range(min = 0, max = 32767, message = "Price must be between 0 and 32767."))]
    pub price: Option<i32>,

    pub color: Option<i64>,
    pub material: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<i64>,

    #[serde(rename = "type")]
    pub clothes_type: Option<i64>,

    pub warehouse: Option<i64>,
    pub indate: Option<NaiveDate>,
    pub is_printed: Option<bool>,

    #[validate(length(max = 200, message = "Comments must have at most 200 characters."))]
    pub comments: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClothesFilter {
    pub warehouse: Option<i64>,
    pub status: Option<i64>,
    #[serde(rename = "type")]
    pub clothes_type: Option<i64>,
    pub is_printed: Option<bool>,
}

// --- 2. Reimpressão de etiqueta ---
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Reprint {
    pub id: i64,
    #[serde(rename = "clothes")]
    pub clothes_id: i64,
    pub rfid: i64,
    pub reason: String,
    pub image: Option<String>,
    pub reprint_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReprintPayload {
    #[validate(range(min = 1, max = 2147483647, message = "RFID must be a positive 32-bit integer."))]
    pub rfid: i64,

    #[validate(length(min = 1, max = 100, message = "Reason must have between 1 and 100 characters."))]
    pub reason: String,

    #[validate(length(max = 1000, message = "Image path must have at most 1000 characters."))]
    pub image: Option<String>,
}

// --- 3. Lote nomeado de roupas ---
pub const DEFAULT_BATCH_MATERIAL: &str = "全棉";

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Batch {
    pub id: i64,
    pub cname: String,
    #[serde(rename = "clothes")]
    pub clothes_id: i64,
    pub name: String,
    pub color: String,
    #[serde(rename = "size")]
    pub size_id: i64,
    pub material: String,
    #[serde(rename = "user")]
    pub user_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBatchPayload {
    #[validate(length(min = 1, max = 50, message = "Batch name must have between 1 and 50 characters."))]
    pub cname: String,

    pub clothes: i64,

    #[validate(length(min = 1, max = 30, message = "Name must have between 1 and 30 characters."))]
    pub name: String,

    #[validate(length(min = 1, max = 5, message = "Color must have between 1 and 5 characters."))]
    pub color: String,

    pub size: i64,

    #[validate(length(min = 1, max = 15, message = "Material must have between 1 and 15 characters."))]
    pub material: Option<String>,
}

// --- 4. Devolução ---
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ClothesReturn {
    pub id: i64,
    #[serde(rename = "clothes")]
    pub clothes_id: i64,
    // Preço de venda
    pub price: i32,
    pub reason: String,
    pub image: Option<String>,
    #[serde(rename = "warehouse")]
    pub warehouse_id: Option<i64>,
    pub return_time: DateTime<Utc>,
    // Responsável pela devolução
    pub handled: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReturnPayload {
    pub clothes: i64,

    #[validate(range(min = 0, max = 32767, message = "Price must be between 0 and 32767."))]
    pub price: i32,

    #[validate(length(min = 1, max = 100, message = "Reason must have between 1 and 100 characters."))]
    pub reason: String,

    #[validate(length(max = 1000, message = "Image path must have at most 1000 characters."))]
    pub image: Option<String>,

    pub warehouse: Option<i64>,

    #[validate(length(min = 1, max = 8, message = "Handler name must have between 1 and 8 characters."))]
    pub handled: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clothes_serializes_foreign_keys_by_entity_name() {
        let clothes = Clothes {
            id: 123456789,
            rfid: Some(42),
            name: "衬衫".into(),
            price: 120,
            color_id: Some(1),
            material_id: None,
            size_id: 2,
            is_printed: false,
            is_reprinted: false,
            status_id: None,
            type_id: 3,
            indate: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            created: Utc::now(),
            warehouse_id: Some(4),
            comments: String::new(),
        };

        let json = serde_json::to_value(&clothes).unwrap();
        assert_eq!(json["color"], 1);
        assert_eq!(json["size"], 2);
        assert_eq!(json["type"], 3);
        assert_eq!(json["warehouse"], 4);
        assert!(json["material"].is_null());
        assert!(json.get("type_id").is_none());
    }

    #[test]
    fn create_payload_checks_small_integer_price_and_rfid_range() {
        let payload: CreateClothesPayload = serde_json::from_value(serde_json::json!({
            "name": "衬衫",
            "price": 40000,
            "size": 1,
            "type": 1,
            "rfid": 3000000000i64
        }))
        .unwrap();

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("rfid"));
    }
}
