// src/cli.rs

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use crate::{
    config::{AppConfig, AppState},
    routes::create_router,
};

#[derive(Parser)]
#[command(name = "garment-inventory")]
#[command(about = "RFID garment warehouse inventory API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default when no command is given)
    Serve {
        /// Bind address, e.g. 0.0.0.0:3000. Overrides BIND_ADDR.
        #[arg(short, long)]
        bind_addr: Option<String>,
    },
    /// Create an active superuser (is_superuser and is_staff set)
    CreateSuperuser {
        #[arg(short, long)]
        username: String,

        /// Password, or the SUPERUSER_PASSWORD environment variable
        #[arg(short, long, env = "SUPERUSER_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

impl Cli {
    pub async fn run(self, mut config: AppConfig) -> anyhow::Result<()> {
        match self.command.unwrap_or(Commands::Serve { bind_addr: None }) {
            Commands::Serve { bind_addr } => {
                if let Some(bind_addr) = bind_addr {
                    config.bind_addr = bind_addr;
                }
                serve(config).await
            }
            Commands::CreateSuperuser { username, password } => {
                let app_state = prepare_state(&config).await?;
                let user = app_state
                    .auth_service
                    .create_superuser(&username, &password)
                    .await
                    .with_context(|| format!("Falha ao criar o superusuário '{}'", username))?;
                tracing::info!("✅ Superusuário '{}' criado (id {})", user.username, user.id);
                Ok(())
            }
        }
    }
}

// Conecta e roda as migrações antes de qualquer comando.
async fn prepare_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let app_state = AppState::new(config).await?;

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .context("Falha ao rodar as migrações do banco de dados.")?;

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");
    Ok(app_state)
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let app_state = prepare_state(&config).await?;
    let app = create_router(app_state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {}", config.bind_addr))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Erro no servidor Axum")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn help_and_version_parse_without_environment() {
        // main() faz o parse antes de AppConfig::from_env
        let err = Cli::try_parse_from(["garment-inventory", "--help"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = Cli::try_parse_from(["garment-inventory", "--version"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["garment-inventory", "serve", "--bind-addr", "127.0.0.1:9000"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve { bind_addr: Some(ref a) }) if a == "127.0.0.1:9000"));

        let cli = Cli::try_parse_from([
            "garment-inventory",
            "create-superuser",
            "--username",
            "root",
            "--password",
            "pw",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::CreateSuperuser { ref username, .. }) if username == "root"));

        let cli = Cli::try_parse_from(["garment-inventory"]).unwrap();
        assert!(cli.command.is_none());
    }
}
