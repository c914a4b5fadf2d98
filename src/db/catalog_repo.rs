// src/db/catalog_repo.rs

use sqlx::SqlitePool;

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    models::catalog::{CatalogTable, ClothesType, Color, Material, Size, Status},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ---
    // Leitura
    // ---

    pub async fn list_materials(&self) -> Result<Vec<Material>, AppError> {
        let rows = sqlx::query_as::<_, Material>("SELECT id, name FROM materials ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_colors(&self) -> Result<Vec<Color>, AppError> {
        let rows = sqlx::query_as::<_, Color>("SELECT id, name, code FROM colors ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    // Tamanhos seguem a ordem de cadastro (S, M, L...), não a alfabética.
    pub async fn list_sizes(&self) -> Result<Vec<Size>, AppError> {
        let rows = sqlx::query_as::<_, Size>("SELECT id, name FROM sizes ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_statuses(&self) -> Result<Vec<Status>, AppError> {
        let rows = sqlx::query_as::<_, Status>("SELECT id, name FROM statuses ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_types(&self) -> Result<Vec<ClothesType>, AppError> {
        let rows = sqlx::query_as::<_, ClothesType>(
            "SELECT id, name, image, comments FROM clothes_types ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ---
    // Escrita
    // ---

    pub async fn create_material(&self, name: &str) -> Result<Material, AppError> {
        sqlx::query_as::<_, Material>("INSERT INTO materials (name) VALUES (?) RETURNING id, name")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "material"))
    }

    pub async fn create_color(&self, name: &str, code: &str) -> Result<Color, AppError> {
        sqlx::query_as::<_, Color>(
            "INSERT INTO colors (name, code) VALUES (?, ?) RETURNING id, name, code",
        )
        .bind(name)
        .bind(code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "color"))
    }

    pub async fn create_size(&self, name: &str) -> Result<Size, AppError> {
        sqlx::query_as::<_, Size>("INSERT INTO sizes (name) VALUES (?) RETURNING id, name")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "size"))
    }

    pub async fn create_status(&self, id: i64, name: &str) -> Result<Status, AppError> {
        sqlx::query_as::<_, Status>("INSERT INTO statuses (id, name) VALUES (?, ?) RETURNING id, name")
            .bind(id)
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "status"))
    }

    pub async fn create_type(
        &self,
        name: &str,
        image: Option<&str>,
        comments: Option<&str>,
    ) -> Result<ClothesType, AppError> {
        sqlx::query_as::<_, ClothesType>(
            r#"
            INSERT INTO clothes_types (name, image, comments)
            VALUES (?, ?, ?)
            RETURNING id, name, image, comments
            "#,
        )
        .bind(name)
        .bind(image)
        .bind(comments)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "type"))
    }

    /// Remove uma entrada de qualquer tabela de atributos.
    /// As roupas que apontam para ela seguem o ON DELETE da migração
    /// (SET NULL para cor/material/status, CASCADE para tamanho/tipo).
    pub async fn delete(&self, table: CatalogTable, id: i64) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", table.table_name());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(table.entity()));
        }
        Ok(())
    }
}
