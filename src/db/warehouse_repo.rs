// src/db/warehouse_repo.rs

use serde_json::Value;
use sqlx::{types::Json, SqlitePool};

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    models::warehouse::{CreateWarehousePayload, UpdateWarehousePayload, Warehouse},
};

#[derive(Clone)]
pub struct WarehouseRepository {
    pool: SqlitePool,
}

impl WarehouseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Warehouse>, AppError> {
        let warehouses = sqlx::query_as::<_, Warehouse>(
            "SELECT id, name, address, coord, user_id FROM warehouses ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(warehouses)
    }

    pub async fn create(&self, input: &CreateWarehousePayload) -> Result<Warehouse, AppError> {
        let coord = input.coord.clone().unwrap_or_else(|| Value::Object(Default::default()));

        sqlx::query_as::<_, Warehouse>(
            r#"
            INSERT INTO warehouses (name, address, coord, user_id)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, address, coord, user_id
            "#,
        )
        .bind(&input.name)
        .bind(&input.address)
        .bind(Json(coord))
        .bind(input.user)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "user"))
    }

    // Atualização parcial: COALESCE mantém o valor atual quando o campo não veio.
    pub async fn update(&self, id: i64, input: &UpdateWarehousePayload) -> Result<Warehouse, AppError> {
        let warehouse = sqlx::query_as::<_, Warehouse>(
            r#"
            UPDATE warehouses SET
                name = COALESCE(?, name),
                address = COALESCE(?, address),
                coord = COALESCE(?, coord),
                user_id = COALESCE(?, user_id)
            WHERE id = ?
            RETURNING id, name, address, coord, user_id
            "#,
        )
        .bind(input.name.as_deref())
        .bind(input.address.as_deref())
        .bind(input.coord.clone().map(Json))
        .bind(input.user)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "user"))?;

        warehouse.ok_or(AppError::NotFound("warehouse"))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM warehouses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("warehouse"));
        }
        Ok(())
    }
}
