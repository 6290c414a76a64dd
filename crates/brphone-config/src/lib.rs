use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "brphone";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;
pub const MAX_CACHE_CAPACITY: usize = 1_000_000;
pub const DEFAULT_PHONE_COLUMN: &str = "phone_number";
/// Sheet columns are detected by this substring when none is configured.
pub const SHEET_COLUMN_HINT: &str = "celular";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub cache_capacity: usize,
    pub default_form: OutputForm,
    pub matching: MatchingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingConfig {
    pub last8_fallback: bool,
    pub sheet_column: Option<String>,
    pub phone_column: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputForm {
    Key,
    Storage,
    Spreadsheet,
    Display,
    Persistence,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            default_form: OutputForm::Key,
            matching: MatchingConfig {
                last8_fallback: true,
                sheet_column: None,
                phone_column: DEFAULT_PHONE_COLUMN.to_string(),
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid cache_capacity value: {0}")]
    InvalidCacheCapacity(usize),
    #[error("invalid column name for {field}: {value:?}")]
    InvalidColumnName { field: &'static str, value: String },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    cache_capacity: Option<usize>,
    default_form: Option<OutputForm>,
    matching: Option<MatchingFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MatchingFile {
    last8_fallback: Option<bool>,
    sheet_column: Option<String>,
    phone_column: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(capacity) = parsed.cache_capacity {
        if capacity > MAX_CACHE_CAPACITY {
            return Err(ConfigError::InvalidCacheCapacity(capacity));
        }
        config.cache_capacity = capacity;
    }

    if let Some(form) = parsed.default_form {
        config.default_form = form;
    }

    if let Some(matching) = parsed.matching {
        if let Some(enabled) = matching.last8_fallback {
            config.matching.last8_fallback = enabled;
        }
        if let Some(column) = matching.sheet_column {
            config.matching.sheet_column = Some(validate_column("sheet_column", column)?);
        }
        if let Some(column) = matching.phone_column {
            config.matching.phone_column = validate_column("phone_column", column)?;
        }
    }

    Ok(config)
}

fn validate_column(field: &'static str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidColumnName { field, value });
    }
    Ok(trimmed.to_string())
}
