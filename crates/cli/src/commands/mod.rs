pub mod ask;
pub mod classify;
pub mod config;
pub mod doctor;
pub mod migrate;
pub mod seed;

use std::sync::Arc;

use campus_agent::AgentRuntime;
use campus_core::config::{AppConfig, LoadOptions};
use campus_core::directory::CampusDirectory;
use campus_db::{connect_from_config, InMemoryDirectory, SqlDirectoryRepository};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        Self::success_with_data(command, message, None)
    }

    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: Option<Value>,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

pub(crate) fn load_config(command: &str) -> Result<AppConfig, CommandResult> {
    AppConfig::load(LoadOptions::default()).map_err(|error| {
        CommandResult::failure(
            command,
            "config_validation",
            format!("configuration issue: {error}"),
            2,
        )
    })
}

pub(crate) fn async_runtime(command: &str) -> Result<tokio::runtime::Runtime, CommandResult> {
    tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(|error| {
        CommandResult::failure(
            command,
            "runtime_init",
            format!("failed to initialize async runtime: {error}"),
            3,
        )
    })
}

/// Directory for one-shot question commands. An unreachable database degrades to an
/// empty in-memory directory so classification still works.
async fn open_directory(config: &AppConfig) -> Arc<dyn CampusDirectory> {
    match connect_from_config(&config.database).await {
        Ok(pool) => Arc::new(SqlDirectoryRepository::new(pool)),
        Err(error) => {
            tracing::warn!(
                event_name = "cli.directory.unavailable",
                error = %error,
                "database unreachable, using an empty directory"
            );
            Arc::new(InMemoryDirectory::default())
        }
    }
}

pub(crate) async fn question_runtime(
    command: &str,
    config: &AppConfig,
) -> Result<AgentRuntime, CommandResult> {
    let directory = open_directory(config).await;
    AgentRuntime::bootstrap(config, directory).await.map_err(|error| {
        CommandResult::failure(command, "runtime_build", format!("{error:#}"), 7)
    })
}
