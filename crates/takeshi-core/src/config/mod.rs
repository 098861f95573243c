mod defaults;


use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::TakeshiError;
use defaults::*;

/// Top-level Takeshi configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub parsing: ParsingConfig,
    #[serde(default)]
    pub creds: CredsConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Characters that mark a message as a command. Every character of the
    /// string is a valid prefix (e.g. `"/!"` accepts both `/menu` and `!menu`).
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            prefix: default_prefix(),
            log_level: default_log_level(),
        }
    }
}

impl BotConfig {
    /// The configured prefix characters.
    pub fn prefixes(&self) -> Vec<char> {
        self.prefix.chars().collect()
    }

    /// The prefix used when rendering help text.
    pub fn display_prefix(&self) -> char {
        self.prefix.chars().next().unwrap_or('/')
    }
}

/// Filesystem locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root of the command manifest tree (one subdirectory per category).
    #[serde(default = "default_commands_dir")]
    pub commands_dir: String,
    #[serde(default = "default_temp_dir")]
    pub temp_dir: String,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            commands_dir: default_commands_dir(),
            temp_dir: default_temp_dir(),
            assets_dir: default_assets_dir(),
        }
    }
}

impl PathsConfig {
    pub fn commands_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand(&self.commands_dir))
    }

    pub fn temp_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand(&self.temp_dir))
    }

    pub fn assets_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand(&self.assets_dir))
    }
}

/// Argument parsing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Characters that split the argument string into separate arguments.
    #[serde(default = "default_arg_separators")]
    pub arg_separators: Vec<char>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            arg_separators: default_arg_separators(),
        }
    }
}

/// Session credential checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredsConfig {
    /// Minimum age in minutes before the last account sync counts as stale.
    #[serde(default = "default_stale_after_minutes")]
    pub stale_after_minutes: i64,
}

impl Default for CredsConfig {
    fn default() -> Self {
        Self {
            stale_after_minutes: default_stale_after_minutes(),
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Apply overrides from a variable lookup (normally the process environment).
///
/// Recognized keys: `BOT_NAME`, `PREFIX`, `COMMANDS_DIR`, `TEMP_DIR`, `ASSETS_DIR`.
/// Empty values are ignored.
pub fn apply_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("BOT_NAME") {
        config.bot.name = v;
    }
    if let Some(v) = get("PREFIX") {
        config.bot.prefix = v;
    }
    if let Some(v) = get("COMMANDS_DIR") {
        config.paths.commands_dir = v;
    }
    if let Some(v) = get("TEMP_DIR") {
        config.paths.temp_dir = v;
    }
    if let Some(v) = get("ASSETS_DIR") {
        config.paths.assets_dir = v;
    }
}

/// Load configuration from a TOML file, then apply environment overrides.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, TakeshiError> {
    let path = Path::new(path);
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TakeshiError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str::<Config>(&content)
            .map_err(|e| TakeshiError::Config(format!("failed to parse config: {}", e)))?
    } else {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        Config::default()
    };

    apply_overrides(&mut config, |key| std::env::var(key).ok());

    if config.bot.prefix.is_empty() {
        return Err(TakeshiError::Config("bot.prefix must not be empty".into()));
    }

    Ok(config)
}
