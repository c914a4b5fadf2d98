// src/test_utils.rs

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::http::HeaderValue;
use axum_test::TestServer;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::{
    common::db_utils::connect_pool, config::AppState, models::auth::User, routes::create_router,
};

// Custo mínimo do bcrypt, para os testes não demorarem.
pub const TEST_BCRYPT_COST: u32 = 4;
pub const TEST_PASSWORD: &str = "s3cret-pass";

/// Banco SQLite em memória com as migrações aplicadas.
/// Uma única conexão, que nunca expira: fechar a conexão apagaria o banco.
pub async fn setup_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("URL de teste inválida")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Falha ao abrir o banco em memória");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Falha ao rodar as migrações");

    pool
}

/// Banco em arquivo (no diretório temporário) com várias conexões, para testes
/// de concorrência. Devolve também o caminho, para o teste apagar no fim.
pub async fn setup_file_app_state(max_connections: u32) -> (AppState, PathBuf) {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let path = std::env::temp_dir().join(format!(
        "garment-inventory-test-{}-{}.db",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    remove_db_files(&path);

    let pool = connect_pool(&format!("sqlite://{}", path.display()), max_connections)
        .await
        .expect("Falha ao abrir o banco em arquivo");
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Falha ao rodar as migrações");

    let app_state = AppState::from_pool(pool, TEST_BCRYPT_COST).expect("Falha ao montar o AppState");
    (app_state, path)
}

pub fn remove_db_files(path: &std::path::Path) {
    for suffix in ["", "-wal", "-shm", "-journal"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

pub async fn setup_test_app_state() -> AppState {
    let pool = setup_test_pool().await;
    AppState::from_pool(pool, TEST_BCRYPT_COST).expect("Falha ao montar o AppState")
}

pub async fn setup_test_app() -> (TestServer, AppState) {
    let app_state = setup_test_app_state().await;
    let server = TestServer::new(create_router(app_state.clone())).expect("Falha ao subir o TestServer");
    (server, app_state)
}

/// Cria um usuário (comum ou superusuário) e devolve junto a chave do token.
pub async fn create_user_with_token(app_state: &AppState, username: &str, superuser: bool) -> (User, String) {
    let user = if superuser {
        app_state
            .auth_service
            .create_superuser(username, TEST_PASSWORD)
            .await
            .expect("Falha ao criar superusuário")
    } else {
        let payload = crate::models::auth::SignupPayload {
            username: username.to_string(),
            password: TEST_PASSWORD.to_string(),
            tel: None,
        };
        app_state.auth_service.signup(&payload).await.expect("Falha ao criar usuário")
    };

    let token = app_state
        .auth_service
        .login(Some(username), Some(TEST_PASSWORD))
        .await
        .expect("Falha no login");

    (user, token)
}

// Valor para o cabeçalho Authorization.
pub fn token_value(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Token {token}")).expect("token com caracteres inválidos")
}
