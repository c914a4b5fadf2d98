// src/services/auth.rs

use axum::http::HeaderMap;
use axum_extra::headers::{Authorization, HeaderMapExt};
use bcrypt::{hash, verify};
use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    common::{db_utils::begin_write, error::AppError},
    db::{TokenRepository, UserRepository},
    models::auth::{SignupPayload, TokenKey, UpdateUserPayload, User, UserFilter},
};

// 20 bytes aleatórios em hexadecimal, o mesmo formato de chave do DRF.
pub fn generate_token_key() -> String {
    let bytes: [u8; 20] = rand::random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    token_repo: TokenRepository,
    pool: SqlitePool,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        token_repo: TokenRepository,
        pool: SqlitePool,
        bcrypt_cost: u32,
    ) -> Self {
        Self { user_repo, token_repo, pool, bcrypt_cost }
    }

    // ---
    // Senhas (bcrypt fora do runtime assíncrono)
    // ---

    async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let cost = self.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    async fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool, AppError> {
        let password_clone = password.to_owned();
        let password_hash_clone = password_hash.to_owned();
        let is_valid = tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
        Ok(is_valid)
    }

    // ---
    // Cadastro
    // ---

    pub async fn signup(&self, payload: &SignupPayload) -> Result<User, AppError> {
        self.create_account(&payload.username, &payload.password, payload.tel.as_deref(), false)
            .await
    }

    // Usado pelo comando `create-superuser` da CLI.
    pub async fn create_superuser(&self, username: &str, password: &str) -> Result<User, AppError> {
        self.create_account(username, password, None, true).await
    }

    async fn create_account(
        &self,
        username: &str,
        password: &str,
        tel: Option<&str>,
        is_superuser: bool,
    ) -> Result<User, AppError> {
        let hashed_password = self.hash_password(password).await?;

        // Usuário e telefone entram juntos ou nenhum dos dois.
        let mut tx = begin_write(&self.pool).await?;

        let user_id = self
            .user_repo
            .create_user(&mut *tx, username, &hashed_password, is_superuser, is_superuser, Utc::now())
            .await?;

        if let Some(tel) = tel {
            self.user_repo.upsert_tel(&mut *tx, user_id, tel).await?;
        }

        let user = self
            .user_repo
            .find_by_id(&mut *tx, user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("usuário {} não encontrado após o insert", user_id))?;

        tx.commit().await?;

        tracing::info!(user_id = user.id, superuser = is_superuser, "Usuário criado");
        Ok(user)
    }

    // ---
    // Login
    // ---

    /// Confere usuário e senha e devolve a chave do token do usuário,
    /// criando-a no primeiro login.
    pub async fn login(&self, username: Option<&str>, password: Option<&str>) -> Result<String, AppError> {
        let (username, password) = match (username, password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
            _ => return Err(AppError::CredentialsRequired),
        };

        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .filter(|user| user.is_active)
            .ok_or(AppError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password).await? {
            return Err(AppError::InvalidCredentials);
        }

        let token = self
            .token_repo
            .get_or_create(user.id, &generate_token_key(), Utc::now())
            .await?;

        Ok(token.key)
    }

    /// Resolve o usuário a partir de "Authorization: Token <key>".
    /// Cabeçalho ausente ou malformado, chave desconhecida e usuário inativo
    /// viram `None`; só falhas de banco viram erro.
    pub async fn get_user_by_auth(&self, headers: &HeaderMap) -> Result<Option<User>, AppError> {
        let Some(Authorization(TokenKey(key))) = headers.typed_get::<Authorization<TokenKey>>() else {
            return Ok(None);
        };

        let Some(token) = self.token_repo.find_by_key(&key).await? else {
            tracing::debug!("Token desconhecido");
            return Ok(None);
        };

        let user = self.user_repo.find_by_id(&self.pool, token.user_id).await?;
        Ok(user.filter(|user| user.is_active))
    }

    // ---
    // Gestão de usuários
    // ---

    pub async fn find_users(&self, filter: &UserFilter) -> Result<Vec<User>, AppError> {
        let users = self.user_repo.filter(filter).await?;
        if users.is_empty() {
            return Err(AppError::NoUsersFound);
        }
        Ok(users)
    }

    /// Troca senha e/ou telefone. Só o próprio usuário ou um superusuário.
    pub async fn update_user(
        &self,
        actor: &User,
        user_id: i64,
        payload: &UpdateUserPayload,
    ) -> Result<User, AppError> {
        if actor.id != user_id && !actor.is_superuser {
            return Err(AppError::SuperuserRequired);
        }

        let hashed_password = match &payload.password {
            Some(password) => Some(self.hash_password(password).await?),
            None => None,
        };

        let mut tx = begin_write(&self.pool).await?;

        if self.user_repo.find_by_id(&mut *tx, user_id).await?.is_none() {
            return Err(AppError::NotFound("user"));
        }

        if let Some(password_hash) = &hashed_password {
            self.user_repo.set_password(&mut *tx, user_id, password_hash).await?;
        }
        if let Some(tel) = &payload.tel {
            self.user_repo.upsert_tel(&mut *tx, user_id, tel).await?;
        }

        let user = self
            .user_repo
            .find_by_id(&mut *tx, user_id)
            .await?
            .ok_or(AppError::NotFound("user"))?;

        tx.commit().await?;
        Ok(user)
    }

    pub async fn deactivate_user(&self, user_id: i64) -> Result<(), AppError> {
        if !self.user_repo.deactivate(user_id).await? {
            return Err(AppError::NotFound("user"));
        }
        tracing::info!(user_id, "Usuário desativado");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_keys_are_forty_hex_chars() {
        let key = generate_token_key();
        assert_eq!(key.len(), 40);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(key, generate_token_key());
    }
}
