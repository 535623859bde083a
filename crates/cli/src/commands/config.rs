use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use makeitsell_core::config::{AppConfig, LoadOptions};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "recommender.default_limit",
        &config.recommender.default_limit.to_string(),
        field_source(
            "recommender.default_limit",
            Some("MAKEITSELL_RECOMMENDER_DEFAULT_LIMIT"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    let fusion = &config.recommender.fusion;
    for (key, weight) in [
        ("recommender.personalized_weight", fusion.personalized),
        ("recommender.collaborative_weight", fusion.collaborative),
        ("recommender.content_weight", fusion.content),
        ("recommender.trending_weight", fusion.trending),
    ] {
        lines.push(render_line(
            key,
            &weight.to_string(),
            field_source(key, None, config_file_doc.as_ref(), config_file_path.as_deref()),
        ));
    }

    lines.push(render_line(
        "data.catalog_path",
        &config.data.catalog_path.display().to_string(),
        field_source(
            "data.catalog_path",
            Some("MAKEITSELL_DATA_CATALOG_PATH"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "data.behavior_path",
        &config.data.behavior_path.display().to_string(),
        field_source(
            "data.behavior_path",
            Some("MAKEITSELL_DATA_BEHAVIOR_PATH"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        field_source(
            "logging.level",
            Some("MAKEITSELL_LOGGING_LEVEL"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        field_source(
            "logging.format",
            Some("MAKEITSELL_LOGGING_FORMAT"),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("makeitsell.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/makeitsell.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: Option<&str>,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_key {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
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
