// src/db/token_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{common::error::AppError, models::auth::AuthToken};

#[derive(Clone)]
pub struct TokenRepository {
    pool: SqlitePool,
}

impl TokenRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_key(&self, key: &str) -> Result<Option<AuthToken>, AppError> {
        let token = sqlx::query_as::<_, AuthToken>(
            "SELECT key, user_id FROM auth_tokens WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(token)
    }

    pub async fn find_by_user<'e, E>(&self, executor: E, user_id: i64) -> Result<Option<AuthToken>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let token = sqlx::query_as::<_, AuthToken>(
            "SELECT key, user_id FROM auth_tokens WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(executor)
        .await?;
        Ok(token)
    }

    // Um token por usuário: se já existir, a chave candidata é descartada.
    pub async fn get_or_create(
        &self,
        user_id: i64,
        candidate_key: &str,
        created: DateTime<Utc>,
    ) -> Result<AuthToken, AppError> {
        sqlx::query(
            r#"
            INSERT INTO auth_tokens (key, user_id, created)
            VALUES (?, ?, ?)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(candidate_key)
        .bind(user_id)
        .bind(created)
        .execute(&self.pool)
        .await?;

        self.find_by_user(&self.pool, user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("token do usuário {} sumiu após o insert", user_id).into())
    }
}
