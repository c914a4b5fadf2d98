// src/db/clothes_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    models::clothes::{
        Batch, Clothes, ClothesFilter, ClothesReturn, CreateBatchPayload, CreateClothesPayload,
        CreateReturnPayload, Reprint, UpdateClothesPayload, DEFAULT_BATCH_MATERIAL,
    },
};

const CLOTHES_COLUMNS: &str = r#"
    id, rfid, name, price, color_id, material_id, size_id, is_printed,
    is_reprinted, status_id, type_id, indate, created, warehouse_id, comments
"#;

// Um payload pode apontar para várias tabelas; o SQLite não diz qual FK falhou.
const CLOTHES_REFERENCES: &str = "color/material/size/status/type/warehouse";

#[derive(Clone)]
pub struct ClothesRepository {
    pool: SqlitePool,
}

impl ClothesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ---
    // Roupas
    // ---

    pub async fn list(&self, filter: &ClothesFilter) -> Result<Vec<Clothes>, AppError> {
        let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {CLOTHES_COLUMNS} FROM clothes WHERE 1 = 1"));

        if let Some(warehouse_id) = filter.warehouse {
            query.push(" AND warehouse_id = ").push_bind(warehouse_id);
        }
        if let Some(status_id) = filter.status {
            query.push(" AND status_id = ").push_bind(status_id);
        }
        if let Some(type_id) = filter.clothes_type {
            query.push(" AND type_id = ").push_bind(type_id);
        }
        if let Some(is_printed) = filter.is_printed {
            query.push(" AND is_printed = ").push_bind(is_printed);
        }
        query.push(" ORDER BY created ASC, id ASC");

        let clothes = query.build_query_as::<Clothes>().fetch_all(&self.pool).await?;
        Ok(clothes)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Clothes>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let clothes = sqlx::query_as::<_, Clothes>(&format!("SELECT {CLOTHES_COLUMNS} FROM clothes WHERE id = ?"))
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(clothes)
    }

    /// Insere com o ID já gerado. Colisão de ID aparece como
    /// `AppError::AlreadyExists("id")` para o serviço tentar de novo.
    pub async fn create(
        &self,
        id: i64,
        input: &CreateClothesPayload,
        indate: NaiveDate,
        created: DateTime<Utc>,
    ) -> Result<Clothes, AppError> {
        sqlx::query_as::<_, Clothes>(&format!(
            r#"
            INSERT INTO clothes (
                id, rfid, name, price, color_id, material_id, size_id, is_printed,
                is_reprinted, status_id, type_id, indate, created, warehouse_id, comments
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?, ?, ?, ?)
            RETURNING {CLOTHES_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(input.rfid)
        .bind(&input.name)
        .bind(input.price)
        .bind(input.color)
        .bind(input.material)
        .bind(input.size)
        .bind(input.is_printed)
        .bind(input.status)
        .bind(input.clothes_type)
        .bind(indate)
        .bind(created)
        .bind(input.warehouse)
        .bind(&input.comments)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, CLOTHES_REFERENCES))
    }

    pub async fn update(&self, id: i64, input: &UpdateClothesPayload) -> Result<Clothes, AppError> {
        let clothes = sqlx::query_as::<_, Clothes>(&format!(
            r#"
            UPDATE clothes SET
                rfid = COALESCE(?, rfid),
                name = COALESCE(?, name),
                price = COALESCE(?, price),
                color_id = COALESCE(?, color_id),
                material_id = COALESCE(?, material_id),
                size_id = COALESCE(?, size_id),
                status_id = COALESCE(?, status_id),
                type_id = COALESCE(?, type_id),
                warehouse_id = COALESCE(?, warehouse_id),
                indate = COALESCE(?, indate),
                is_printed = COALESCE(?, is_printed),
                comments = COALESCE(?, comments)
            WHERE id = ?
            RETURNING {CLOTHES_COLUMNS}
            "#
        ))
        .bind(input.rfid)
        .bind(input.name.as_deref())
        .bind(input.price)
        .bind(input.color)
        .bind(input.material)
        .bind(input.size)
        .bind(input.status)
        .bind(input.clothes_type)
        .bind(input.warehouse)
        .bind(input.indate)
        .bind(input.is_printed)
        .bind(input.comments.as_deref())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, CLOTHES_REFERENCES))?;

        clothes.ok_or(AppError::NotFound("clothes"))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM clothes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("clothes"));
        }
        Ok(())
    }

    pub async fn mark_reprinted<'e, E>(&self, executor: E, id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE clothes SET is_reprinted = 1 WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("clothes"));
        }
        Ok(())
    }

    // ---
    // Reimpressões
    // ---

    pub async fn create_reprint<'e, E>(
        &self,
        executor: E,
        clothes_id: i64,
        rfid: i64,
        reason: &str,
        image: Option<&str>,
        reprint_time: DateTime<Utc>,
    ) -> Result<Reprint, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Reprint>(
            r#"
            INSERT INTO reprints (clothes_id, rfid, reason, image, reprint_time)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, clothes_id, rfid, reason, image, reprint_time
            "#,
        )
        .bind(clothes_id)
        .bind(rfid)
        .bind(reason)
        .bind(image)
        .bind(reprint_time)
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(e, "clothes"))
    }

    pub async fn list_reprints(&self, clothes_id: i64) -> Result<Vec<Reprint>, AppError> {
        let reprints = sqlx::query_as::<_, Reprint>(
            r#"
            SELECT id, clothes_id, rfid, reason, image, reprint_time
            FROM reprints
            WHERE clothes_id = ?
            ORDER BY reprint_time ASC, id ASC
            "#,
        )
        .bind(clothes_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reprints)
    }

    // ---
    // Devoluções
    // ---

    pub async fn create_return(
        &self,
        input: &CreateReturnPayload,
        return_time: DateTime<Utc>,
    ) -> Result<ClothesReturn, AppError> {
        sqlx::query_as::<_, ClothesReturn>(
            r#"
            INSERT INTO returns (clothes_id, price, reason, image, warehouse_id, return_time, handled)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, clothes_id, price, reason, image, warehouse_id, return_time, handled
            "#,
        )
        .bind(input.clothes)
        .bind(input.price)
        .bind(&input.reason)
        .bind(input.image.as_deref())
        .bind(input.warehouse)
        .bind(return_time)
        .bind(&input.handled)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "clothes/warehouse"))
    }

    pub async fn list_returns(&self) -> Result<Vec<ClothesReturn>, AppError> {
        let returns = sqlx::query_as::<_, ClothesReturn>(
            r#"
            SELECT id, clothes_id, price, reason, image, warehouse_id, return_time, handled
            FROM returns
            ORDER BY return_time DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(returns)
    }

    // ---
    // Lotes
    // ---

    pub async fn create_batch(&self, input: &CreateBatchPayload, user_id: i64) -> Result<Batch, AppError> {
        let material = input.material.as_deref().unwrap_or(DEFAULT_BATCH_MATERIAL);

        sqlx::query_as::<_, Batch>(
            r#"
            INSERT INTO batches (cname, clothes_id, name, color, size_id, material, user_id)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, cname, clothes_id, name, color, size_id, material, user_id
            "#,
        )
        .bind(&input.cname)
        .bind(input.clothes)
        .bind(&input.name)
        .bind(&input.color)
        .bind(input.size)
        .bind(material)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "clothes/size"))
    }

    pub async fn list_batches(&self) -> Result<Vec<Batch>, AppError> {
        let batches = sqlx::query_as::<_, Batch>(
            "SELECT id, cname, clothes_id, name, color, size_id, material, user_id FROM batches ORDER BY cname ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(batches)
    }

    pub async fn delete_batch(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM batches WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("batch"));
        }
        Ok(())
    }
}
