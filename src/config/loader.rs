//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "TIMETABLE_DND_CONFIG";

/// Environment variable overriding the scroll-gate hot zone.
pub const HOT_ZONE_ENV_VAR: &str = "TIMETABLE_DND_HOT_ZONE_PX";

/// Largest accepted `just_created_window_secs`.
const MAX_WINDOW_SECS: i64 = i64::MAX / 1_000;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A pixel or duration value is negative or not finite.
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// Config key.
        field: &'static str,
        /// Offending value as written.
        value: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/timetable-dnd/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Scroll-gate hot zone height.
    #[serde(default)]
    pub hot_zone_px: Option<f64>,

    /// Half-height of the expanded trash region.
    #[serde(default)]
    pub trash_half_height_px: Option<f64>,

    /// Trash height while the group is active but not expanded.
    #[serde(default)]
    pub trash_sensor_height_px: Option<f64>,

    /// Mouse/pen travel before a press becomes a drag.
    #[serde(default)]
    pub activation_distance_px: Option<f64>,

    /// Touch hold before a press becomes a drag.
    #[serde(default)]
    pub touch_delay_ms: Option<u64>,

    /// Touch travel allowed during the hold.
    #[serde(default)]
    pub touch_tolerance_px: Option<f64>,

    /// Age under which the newest timetable wins initial selection.
    #[serde(default)]
    pub just_created_window_secs: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file and env vars. The pixel values were
/// tuned by hand; nothing in the engine depends on their exact magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Band at the bottom of the scroll container where auto-scroll stays
    /// allowed while hovering the trash.
    pub hot_zone_px: f64,
    /// Half-height of the expanded trash region. The dragged card's center is
    /// stopped at this line below the list.
    pub trash_half_height_px: f64,
    /// Trash height while the group is active but not expanded.
    pub trash_sensor_height_px: f64,
    /// Mouse/pen travel before a press becomes a drag.
    pub activation_distance_px: f64,
    /// Touch hold before a press becomes a drag.
    pub touch_delay_ms: u64,
    /// Touch travel allowed during the hold.
    pub touch_tolerance_px: f64,
    /// Age under which the newest timetable wins initial selection.
    pub just_created_window_secs: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hot_zone_px: 80.0,
            trash_half_height_px: 64.0,
            trash_sensor_height_px: 48.0,
            activation_distance_px: 8.0,
            touch_delay_ms: 150,
            touch_tolerance_px: 5.0,
            just_created_window_secs: 60,
            log_file_path: default_log_path(),
        }
    }
}

impl EngineConfig {
    /// Height of the trash region when expanded.
    pub fn trash_expanded_height_px(&self) -> f64 {
        self.trash_half_height_px * 2.0
    }

    /// Check every pixel value is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pixels = [
            ("hot_zone_px", self.hot_zone_px),
            ("trash_half_height_px", self.trash_half_height_px),
            ("trash_sensor_height_px", self.trash_sensor_height_px),
            ("activation_distance_px", self.activation_distance_px),
            ("touch_tolerance_px", self.touch_tolerance_px),
        ];
        for (field, value) in pixels {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    value: value.to_string(),
                });
            }
        }
        self.just_created_window()?;
        Ok(())
    }

    /// The just-created selection window as a chrono duration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] when the window does not fit a chrono
    /// duration.
    pub fn just_created_window(&self) -> Result<chrono::Duration, ConfigError> {
        let secs = self.just_created_window_secs;
        i64::try_from(secs)
            .ok()
            .filter(|secs| *secs <= MAX_WINDOW_SECS)
            .and_then(chrono::Duration::try_seconds)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "just_created_window_secs",
                value: secs.to_string(),
            })
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/timetable-dnd/timetable-dnd.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("timetable-dnd").join("timetable-dnd.log")
    } else {
        PathBuf::from("timetable-dnd.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/timetable-dnd/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("timetable-dnd").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument
/// 2. `TIMETABLE_DND_CONFIG` environment variable
/// 3. Default path `~/.config/timetable-dnd/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> EngineConfig {
    let defaults = EngineConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    EngineConfig {
        hot_zone_px: config.hot_zone_px.unwrap_or(defaults.hot_zone_px),
        trash_half_height_px: config
            .trash_half_height_px
            .unwrap_or(defaults.trash_half_height_px),
        trash_sensor_height_px: config
            .trash_sensor_height_px
            .unwrap_or(defaults.trash_sensor_height_px),
        activation_distance_px: config
            .activation_distance_px
            .unwrap_or(defaults.activation_distance_px),
        touch_delay_ms: config.touch_delay_ms.unwrap_or(defaults.touch_delay_ms),
        touch_tolerance_px: config
            .touch_tolerance_px
            .unwrap_or(defaults.touch_tolerance_px),
        just_created_window_secs: config
            .just_created_window_secs
            .unwrap_or(defaults.just_created_window_secs),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `TIMETABLE_DND_HOT_ZONE_PX`: Override hot zone height (ignored if not a number)
pub fn apply_env_overrides(mut config: EngineConfig) -> EngineConfig {
    if let Ok(raw) = std::env::var(HOT_ZONE_ENV_VAR) {
        match raw.trim().parse::<f64>() {
            Ok(px) => config.hot_zone_px = px,
            Err(_) => warn!(value = %raw, "Ignoring non-numeric {}", HOT_ZONE_ENV_VAR),
        }
    }

    config
}

/// Load, merge, override and validate in one step.
///
/// Precedence chain: Defaults → Config File → Env Vars (highest)
///
/// # Errors
///
/// Returns error if a config file exists but is unreadable, or if the resolved
/// values fail validation.
pub fn resolve_config(config_path: Option<PathBuf>) -> Result<EngineConfig, ConfigError> {
    let config_file = load_config_with_precedence(config_path)?;
    let config = apply_env_overrides(merge_config(config_file));
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
