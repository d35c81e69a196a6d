use std::sync::Arc;

use campus_agent::AgentRuntime;
use campus_core::config::{AppConfig, ConfigError, LoadOptions};
use campus_db::{connect_from_config, migrations, DbPool, SqlDirectoryRepository};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub runtime: Arc<AgentRuntime>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
    #[error("question pipeline failed to start: {0:#}")]
    Runtime(anyhow::Error),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

/// Connects, migrates, and builds the question pipeline with the roster loaded from the
/// directory tables.
pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let db_pool =
        connect_from_config(&config.database).await.map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    let directory = Arc::new(SqlDirectoryRepository::new(db_pool.clone()));
    let runtime =
        AgentRuntime::bootstrap(&config, directory).await.map_err(BootstrapError::Runtime)?;
    info!(
        event_name = "system.bootstrap.runtime_ready",
        correlation_id = "bootstrap",
        roster_entries = runtime.roster_size(),
        "question pipeline ready"
    );

    Ok(Application { config, db_pool, runtime: Arc::new(runtime) })
}

#[cfg(test)]
mod tests {
    use campus_core::config::{ConfigOverrides, LoadOptions};
    use campus_core::domain::category::Category;
    use campus_db::CampusSeedDataset;

    use crate::bootstrap::bootstrap;

    fn options(database_url: &str) -> LoadOptions {
        LoadOptions {
            overrides: ConfigOverrides {
                database_url: Some(database_url.to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        }
    }

    #[tokio::test]
    async fn bootstrap_fails_fast_on_invalid_database_url() {
        let result = bootstrap(options("postgres://localhost/campus")).await;

        let message = result.err().expect("error").to_string();
        assert!(message.contains("database.url"));
    }

    #[tokio::test]
    async fn bootstrap_migrates_and_answers_after_roster_reload() {
        let app = bootstrap(options("sqlite::memory:")).await.expect("bootstrap");

        let (table_count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master \
             WHERE type = 'table' AND name IN ('teacher', 'discipline', 'navigation_point')",
        )
        .fetch_one(&app.db_pool)
        .await
        .expect("directory tables after bootstrap");
        assert_eq!(table_count, 3);
        assert_eq!(app.runtime.roster_size(), 0);

        CampusSeedDataset::load(&app.db_pool).await.expect("seed");
        assert_eq!(app.runtime.reload_roster().await.expect("reload"), 5);

        let reply = app.runtime.handle_message("кто такая Смирнова?").await.expect("question");
        assert_eq!(reply.result.category, Category::Teacher);
        assert_eq!(reply.result.entities, vec!["Смирнова Ольга Викторовна".to_string()]);
        assert!(reply.chunks.join("\n").contains("Экономика"));

        app.db_pool.close().await;
    }
}
