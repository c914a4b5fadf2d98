// src/config.rs

use std::{env, fmt::Display, str::FromStr};

use anyhow::Context;
use sqlx::SqlitePool;

use crate::{
    common::{db_utils::connect_pool, i18n::I18nStore},
    db::{
        CatalogRepository, ClothesRepository, TemplateRepository, TokenRepository, UserRepository,
        WarehouseRepository,
    },
    services::{auth::AuthService, clothes_service::ClothesService, template_service::TemplateService},
};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://garment.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// Configuração lida do ambiente (e do .env, se existir)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            db_max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                env::var("DB_MAX_CONNECTIONS").ok(),
                DEFAULT_MAX_CONNECTIONS,
            )?,
            bcrypt_cost: parse_or("BCRYPT_COST", env::var("BCRYPT_COST").ok(), bcrypt::DEFAULT_COST)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.db_max_connections > 0, "DB_MAX_CONNECTIONS deve ser maior que zero");
        anyhow::ensure!(
            (4..=31).contains(&self.bcrypt_cost),
            "BCRYPT_COST deve estar entre 4 e 31 (recebido {})",
            self.bcrypt_cost
        );
        Ok(())
    }
}

fn parse_or<T>(name: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} inválido ({:?}): {}", name, value, e)),
        None => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub i18n_store: I18nStore,
    pub auth_service: AuthService,
    pub catalog_repo: CatalogRepository,
    pub warehouse_repo: WarehouseRepository,
    pub clothes_repo: ClothesRepository,
    pub clothes_service: ClothesService,
    pub template_service: TemplateService,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let db_pool = connect_pool(&config.database_url, config.db_max_connections)
            .await
            .with_context(|| format!("Falha ao conectar em {}", config.database_url))?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Self::from_pool(db_pool, config.bcrypt_cost)
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: SqlitePool, bcrypt_cost: u32) -> anyhow::Result<Self> {
        let i18n_store = I18nStore::load()?;

        let user_repo = UserRepository::new(db_pool.clone());
        let token_repo = TokenRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let warehouse_repo = WarehouseRepository::new(db_pool.clone());
        let clothes_repo = ClothesRepository::new(db_pool.clone());
        let template_repo = TemplateRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, token_repo, db_pool.clone(), bcrypt_cost);
        let clothes_service = ClothesService::new(clothes_repo.clone(), db_pool.clone());
        let template_service = TemplateService::new(template_repo, db_pool.clone());

        Ok(Self {
            db_pool,
            i18n_store,
            auth_service,
            catalog_repo,
            warehouse_repo,
            clothes_repo,
            clothes_service,
            template_service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_uses_default_when_missing() {
        assert_eq!(parse_or("X", None, 7u32).unwrap(), 7);
        assert_eq!(parse_or("X", Some(" 12 ".into()), 7u32).unwrap(), 12);
    }

    #[test]
    fn parse_or_rejects_garbage() {
        let err = parse_or("DB_MAX_CONNECTIONS", Some("many".into()), 5u32).unwrap_err();
        assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
    }

    #[test]
    fn bcrypt_cost_must_be_in_range() {
        let config = AppConfig {
            database_url: DEFAULT_DATABASE_URL.into(),
            bind_addr: DEFAULT_BIND_ADDR.into(),
            db_max_connections: 5,
            bcrypt_cost: 3,
        };
        assert!(config.validate().is_err());
        assert!(AppConfig { bcrypt_cost: 4, ..config }.validate().is_ok());
    }
}
