// src/db/template_repo.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    models::template::TemplateRow,
};

#[derive(Clone)]
pub struct TemplateRepository {
    pool: SqlitePool,
}

impl TemplateRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<TemplateRow>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, TemplateRow>("SELECT id, name, body FROM templates ORDER BY id ASC")
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    pub async fn create<'e, E>(&self, executor: E, name: &str, body: &str) -> Result<TemplateRow, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, TemplateRow>(
            "INSERT INTO templates (name, body) VALUES (?, ?) RETURNING id, name, body",
        )
        .bind(name)
        .bind(body)
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(e, "template"))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        name: Option<&str>,
        body: Option<&str>,
    ) -> Result<Option<TemplateRow>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, TemplateRow>(
            r#"
            UPDATE templates SET
                name = COALESCE(?, name),
                body = COALESCE(?, body)
            WHERE id = ?
            RETURNING id, name, body
            "#,
        )
        .bind(name)
        .bind(body)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_write_error(e, "template"))
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM templates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Relação N:N templates <-> users
    // ---

    pub async fn list_user_ids<'e, E>(&self, executor: E, template_id: i64) -> Result<Vec<i64>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM template_users WHERE template_id = ? ORDER BY user_id ASC",
        )
        .bind(template_id)
        .fetch_all(executor)
        .await?;
        Ok(ids)
    }

    pub async fn clear_users<'e, E>(&self, executor: E, template_id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM template_users WHERE template_id = ?")
            .bind(template_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    // Usuário inexistente vira InvalidReference("users").
    pub async fn add_user<'e, E>(&self, executor: E, template_id: i64, user_id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "INSERT INTO template_users (template_id, user_id) VALUES (?, ?) ON CONFLICT DO NOTHING",
        )
        .bind(template_id)
        .bind(user_id)
        .execute(executor)
        .await
        .map_err(|e| map_write_error(e, "users"))?;
        Ok(())
    }
}
