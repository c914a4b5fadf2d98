// src/models/warehouse.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Warehouse {
    pub id: i64,

    #[schema(example = "北京一号仓")]
    pub name: String,

    #[schema(example = "北京市朝阳区")]
    pub address: String,

    // Latitude/longitude livres, ex: {"lat": 39.9, "lng": 116.4}
    #[schema(value_type = Object)]
    pub coord: Json<Value>,

    #[serde(rename = "user")]
    pub user_id: Option<i64>,
}

fn validate_coord(coord: &Value) -> Result<(), ValidationError> {
    if !coord.is_object() {
        let mut err = ValidationError::new("coord_object");
        err.message = Some("Coordinates must be a JSON object.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateWarehousePayload {
    #[validate(length(min = 1, max = 50, message = "Name must have between 1 and 50 characters."))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Address must have between 1 and 100 characters."))]
    pub address: String,

    #[validate(custom(function = "validate_coord"))]
    #[schema(value_type = Object)]
    pub coord: Option<Value>,

    // Dono do armazém
    pub user: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateWarehousePayload {
    #[validate(length(min = 1, max = 50, message = "Name must have between 1 and 50 characters."))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Address must have between 1 and 100 characters."))]
    pub address: Option<String>,

    #[validate(custom(function = "validate_coord"))]
    #[schema(value_type = Object)]
    pub coord: Option<Value>,

    pub user: Option<i64>,
}
