use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::common::error::AppError;

// ---
// Pool
// ---

pub async fn connect_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await
}

// Transação de escrita: pega o lock de escrita já no BEGIN.
// Uma transação DEFERRED que lê antes de escrever recebe SQLITE_BUSY na hora
// se outra escrita estiver em andamento; com IMMEDIATE ela espera o busy_timeout.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

// ---
// Tradução de erros de escrita
// ---

// O SQLite não expõe o nome da constraint, só a mensagem:
// "UNIQUE constraint failed: clothes.rfid" (ou "t.a, t.b" para chaves compostas).
fn unique_violation_column(message: &str) -> Option<&str> {
    let columns = message.strip_prefix("UNIQUE constraint failed: ")?;
    let first = columns.split(',').next()?.trim();
    first.rsplit('.').next().filter(|c| !c.is_empty())
}

/// Converte violações de UNIQUE / FOREIGN KEY em erros de domínio.
/// `reference_field` é o campo do payload que aponta para outra tabela.
pub(crate) fn map_write_error(err: sqlx::Error, reference_field: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            if let Some(column) = unique_violation_column(db_err.message()) {
                return AppError::AlreadyExists(column.to_string());
            }
        }
        if db_err.is_foreign_key_violation() {
            return AppError::InvalidReference(reference_field.to_string());
        }
    }
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_column_from_unique_violation() {
        assert_eq!(
            unique_violation_column("UNIQUE constraint failed: clothes.rfid"),
            Some("rfid")
        );
        assert_eq!(
            unique_violation_column("UNIQUE constraint failed: template_users.template_id, template_users.user_id"),
            Some("template_id")
        );
        assert_eq!(unique_violation_column("FOREIGN KEY constraint failed"), None);
    }

    #[test]
    fn non_database_errors_pass_through() {
        let err = map_write_error(sqlx::Error::RowNotFound, "size");
        assert!(matches!(err, AppError::DatabaseError(sqlx::Error::RowNotFound)));
    }
}
