// Configuration loading and validation.
//
// Reads `gridiron.toml` from the working directory, falling back to the
// platform config directory. Every section is optional except `[data]`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use gridiron_core::franchise::FranchiseMap;

pub const CONFIG_FILE: &str = "gridiron.toml";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for {field}: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Archive encoding. `Auto` picks by file extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveFormat {
    #[default]
    Auto,
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataConfig {
    pub games: PathBuf,
    #[serde(default)]
    pub format: ArchiveFormat,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchupConfig {
    #[serde(default = "default_recent_games")]
    pub recent_games: usize,
}

impl Default for MatchupConfig {
    fn default() -> Self {
        Self {
            recent_games: default_recent_games(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

fn default_log_filter() -> String {
    "gridiron=info,warn".to_string()
}

fn default_recent_games() -> usize {
    10
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub matchup: MatchupConfig,
    /// Team name to franchise overrides, merged over the built-in map.
    #[serde(default)]
    pub franchises: BTreeMap<String, String>,
}

impl Config {
    /// Defaults for running without a config file, reading `games` directly.
    pub fn with_games(games: PathBuf) -> Self {
        Self {
            data: DataConfig {
                games,
                format: ArchiveFormat::Auto,
            },
            output: OutputConfig::default(),
            log: LogConfig::default(),
            matchup: MatchupConfig::default(),
            franchises: BTreeMap::new(),
        }
    }

    /// The built-in franchise map with this config's overrides applied.
    pub fn franchise_map(&self) -> FranchiseMap {
        let mut map = FranchiseMap::nfl_default();
        map.extend(self.franchises.iter().map(|(k, v)| (k.clone(), v.clone())));
        map
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `gridiron.toml` from `base_dir`. A relative
/// `data.games` path is resolved against `base_dir`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join(CONFIG_FILE);
    let text = read_file(&path)?;
    let mut config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    if config.data.games.is_relative() {
        config.data.games = base_dir.join(&config.data.games);
    }

    validate(&config)?;

    Ok(config)
}

/// Loads from the current directory if it has a `gridiron.toml`, otherwise
/// from the platform config directory (e.g. `~/.config/gridiron`).
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if cwd.join(CONFIG_FILE).exists() {
        return load_config_from(&cwd);
    }
    match user_config_dir() {
        Some(dir) if dir.join(CONFIG_FILE).exists() => load_config_from(&dir),
        _ => Err(ConfigError::FileNotFound {
            path: cwd.join(CONFIG_FILE),
        }),
    }
}

fn user_config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "gridiron").map(|dirs| dirs.config_dir().to_path_buf())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.games.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.games".into(),
            message: "must not be empty".into(),
        });
    }

    if config.matchup.recent_games == 0 {
        return Err(ConfigError::ValidationError {
            field: "matchup.recent_games".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.log.filter.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "log.filter".into(),
            message: "must not be empty".into(),
        });
    }

    for (team, franchise) in &config.franchises {
        if team.trim().is_empty() || franchise.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "franchises".into(),
                message: format!("blank entry '{team}' = '{franchise}'"),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
