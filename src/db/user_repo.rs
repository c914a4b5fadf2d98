// src/db/user_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    models::auth::{User, UserFilter},
};

// O telefone vive em 'supply_users' (1:1), por isso o LEFT JOIN.
const SELECT_USER: &str = r#"
    SELECT
        u.id, u.username, u.password, u.is_superuser, u.is_staff,
        u.is_active, u.date_joined, s.tel
    FROM users u
    LEFT JOIN supply_users s ON s.user_id = u.id
"#;

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE u.username = ?"))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    // Aceita executor para poder reler o usuário dentro de uma transação.
    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE u.id = ?"))
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(user)
    }

    pub async fn filter(&self, filter: &UserFilter) -> Result<Vec<User>, AppError> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_USER);
        query.push(" WHERE 1 = 1");

        if let Some(id) = filter.id {
            query.push(" AND u.id = ").push_bind(id);
        }
        if let Some(username) = &filter.username {
            query.push(" AND u.username = ").push_bind(username.clone());
        }
        if let Some(flag) = filter.is_superuser {
            query.push(" AND u.is_superuser = ").push_bind(flag);
        }
        if let Some(flag) = filter.is_staff {
            query.push(" AND u.is_staff = ").push_bind(flag);
        }
        if let Some(flag) = filter.is_active {
            query.push(" AND u.is_active = ").push_bind(flag);
        }
        query.push(" ORDER BY u.id");

        let users = query.build_query_as::<User>().fetch_all(&self.pool).await?;
        Ok(users)
    }

    // Cria um novo usuário e devolve o ID.
    // Nome de usuário duplicado vira UsernameAlreadyExists.
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        username: &str,
        password_hash: &str,
        is_superuser: bool,
        is_staff: bool,
        date_joined: DateTime<Utc>,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (username, password, is_superuser, is_staff, is_active, date_joined)
            VALUES (?, ?, ?, ?, 1, ?)
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(is_superuser)
        .bind(is_staff)
        .bind(date_joined)
        .fetch_one(executor)
        .await
        .map_err(|e| match map_write_error(e, "user") {
            AppError::AlreadyExists(column) if column == "username" => AppError::UsernameAlreadyExists,
            other => other,
        })?;

        Ok(id)
    }

    pub async fn set_password<'e, E>(&self, executor: E, id: i64, password_hash: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("UPDATE users SET password = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Cria ou troca o telefone de fornecedor do usuário.
    pub async fn upsert_tel<'e, E>(&self, executor: E, user_id: i64, tel: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO supply_users (user_id, tel) VALUES (?, ?)
            ON CONFLICT (user_id) DO UPDATE SET tel = excluded.tel
            "#,
        )
        .bind(user_id)
        .bind(tel)
        .execute(executor)
        .await
        .map_err(|e| map_write_error(e, "user"))?;
        Ok(())
    }

    // "Exclusão" lógica: o usuário some do login, mas os vínculos ficam.
    pub async fn deactivate(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE users SET is_active = 0 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
