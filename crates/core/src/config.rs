use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recommend::{FusionWeights, DEFAULT_FUSION_WEIGHTS, DEFAULT_LIMIT};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub recommender: RecommenderConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct RecommenderConfig {
    /// Cap applied when a request does not specify one.
    pub default_limit: usize,
    /// Hybrid blend weights; must sum to 1.0.
    pub fusion: FusionWeights,
}

#[derive(Clone, Debug)]
pub struct DataConfig {
    pub catalog_path: PathBuf,
    pub behavior_path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub default_limit: Option<usize>,
    pub catalog_path: Option<PathBuf>,
    pub behavior_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recommender: RecommenderConfig {
                default_limit: DEFAULT_LIMIT,
                fusion: DEFAULT_FUSION_WEIGHTS,
            },
            data: DataConfig {
                catalog_path: PathBuf::from("data/catalog.json"),
                behavior_path: PathBuf::from("data/behavior.json"),
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from("makeitsell.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(recommender) = patch.recommender {
            if let Some(default_limit) = recommender.default_limit {
                self.recommender.default_limit = default_limit;
            }
            if let Some(personalized) = recommender.personalized_weight {
                self.recommender.fusion.personalized = personalized;
            }
            if let Some(collaborative) = recommender.collaborative_weight {
                self.recommender.fusion.collaborative = collaborative;
            }
            if let Some(content) = recommender.content_weight {
                self.recommender.fusion.content = content;
            }
            if let Some(trending) = recommender.trending_weight {
                self.recommender.fusion.trending = trending;
            }
        }

        if let Some(data) = patch.data {
            if let Some(catalog_path) = data.catalog_path {
                self.data.catalog_path = catalog_path;
            }
            if let Some(behavior_path) = data.behavior_path {
                self.data.behavior_path = behavior_path;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("MAKEITSELL_RECOMMENDER_DEFAULT_LIMIT") {
            self.recommender.default_limit =
                parse_usize("MAKEITSELL_RECOMMENDER_DEFAULT_LIMIT", &value)?;
        }

        if let Some(value) = read_env("MAKEITSELL_DATA_CATALOG_PATH") {
            self.data.catalog_path = PathBuf::from(value);
        }
        if let Some(value) = read_env("MAKEITSELL_DATA_BEHAVIOR_PATH") {
            self.data.behavior_path = PathBuf::from(value);
        }

        let log_level =
            read_env("MAKEITSELL_LOGGING_LEVEL").or_else(|| read_env("MAKEITSELL_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("MAKEITSELL_LOGGING_FORMAT").or_else(|| read_env("MAKEITSELL_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(default_limit) = overrides.default_limit {
            self.recommender.default_limit = default_limit;
        }
        if let Some(catalog_path) = overrides.catalog_path {
            self.data.catalog_path = catalog_path;
        }
        if let Some(behavior_path) = overrides.behavior_path {
            self.data.behavior_path = behavior_path;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_recommender(&self.recommender)?;
        validate_data(&self.data)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("makeitsell.toml"), PathBuf::from("config/makeitsell.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    toml::from_str::<ConfigPatch>(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn validate_recommender(recommender: &RecommenderConfig) -> Result<(), ConfigError> {
    if recommender.default_limit == 0 {
        return Err(ConfigError::Validation(
            "recommender.default_limit must be greater than zero".to_string(),
        ));
    }

    let weights = [
        ("personalized_weight", recommender.fusion.personalized),
        ("collaborative_weight", recommender.fusion.collaborative),
        ("content_weight", recommender.fusion.content),
        ("trending_weight", recommender.fusion.trending),
    ];
    for (name, weight) in weights {
        if !(0.0..=1.0).contains(&weight) {
            return Err(ConfigError::Validation(format!(
                "recommender.{name} must be in range 0.0..=1.0"
            )));
        }
    }

    if recommender.fusion.validate().is_err() {
        return Err(ConfigError::Validation(format!(
            "recommender fusion weights must sum to 1.0, got {}",
            recommender.fusion.sum()
        )));
    }

    Ok(())
}

fn validate_data(data: &DataConfig) -> Result<(), ConfigError> {
    if data.catalog_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation("data.catalog_path must not be empty".to_string()));
    }
    if data.behavior_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation("data.behavior_path must not be empty".to_string()));
    }
    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    recommender: Option<RecommenderPatch>,
    data: Option<DataPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct RecommenderPatch {
    default_limit: Option<usize>,
    personalized_weight: Option<f64>,
    collaborative_weight: Option<f64>,
    content_weight: Option<f64>,
    trending_weight: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct DataPatch {
    catalog_path: Option<PathBuf>,
    behavior_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
