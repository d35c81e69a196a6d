use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use campus_core::config::{AppConfig, LoadOptions};
use toml::Value;

struct ConfigSources {
    file_doc: Option<Value>,
    file_path: Option<PathBuf>,
}

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let file_path = detect_config_path();
    let sources = ConfigSources { file_doc: load_config_file_doc(file_path.as_deref()), file_path };

    let dictionary_path = config
        .nlp
        .dictionary_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<unset>".to_string());

    let line = |key: &str, value: &str, env_keys: &[&str]| {
        render_line(key, value, field_source(key, env_keys, &sources))
    };

    let lines = vec![
        "effective config (source precedence: env > file > default):".to_string(),
        line("database.url", &redact_url(&config.database.url), &["CAMPUS_DATABASE_URL"]),
        line(
            "database.max_connections",
            &config.database.max_connections.to_string(),
            &["CAMPUS_DATABASE_MAX_CONNECTIONS"],
        ),
        line(
            "database.timeout_secs",
            &config.database.timeout_secs.to_string(),
            &["CAMPUS_DATABASE_TIMEOUT_SECS"],
        ),
        line("nlp.reducer", &format!("{:?}", config.nlp.reducer), &["CAMPUS_NLP_REDUCER"]),
        line("nlp.dictionary_path", &dictionary_path, &["CAMPUS_NLP_DICTIONARY_PATH"]),
        line(
            "nlp.max_query_chars",
            &config.nlp.max_query_chars.to_string(),
            &["CAMPUS_NLP_MAX_QUERY_CHARS"],
        ),
        line(
            "nlp.max_message_chars",
            &config.nlp.max_message_chars.to_string(),
            &["CAMPUS_NLP_MAX_MESSAGE_CHARS"],
        ),
        line("server.bind_address", &config.server.bind_address, &["CAMPUS_SERVER_BIND_ADDRESS"]),
        line("server.port", &config.server.port.to_string(), &["CAMPUS_SERVER_PORT"]),
        line(
            "server.graceful_shutdown_secs",
            &config.server.graceful_shutdown_secs.to_string(),
            &["CAMPUS_SERVER_GRACEFUL_SHUTDOWN_SECS"],
        ),
        line(
            "logging.level",
            &config.logging.level,
            &["CAMPUS_LOGGING_LEVEL", "CAMPUS_LOG_LEVEL"],
        ),
        line(
            "logging.format",
            &format!("{:?}", config.logging.format),
            &["CAMPUS_LOGGING_FORMAT", "CAMPUS_LOG_FORMAT"],
        ),
    ];
    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    ["campus.toml", "config/campus.toml"].into_iter().map(PathBuf::from).find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let raw = fs::read_to_string(path?).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(key_path: &str, env_keys: &[&str], sources: &ConfigSources) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = &sources.file_doc {
        if contains_path(doc, key_path) {
            let file_path = sources
                .file_path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

/// Hides `user:password@` credentials if a URL carries them.
fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.split_once('@') {
        Some((_, host)) => format!("{scheme}://***@{host}"),
        None => url.to_string(),
    }
}
