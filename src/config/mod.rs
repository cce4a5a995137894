//! Configuration module.
//!
//! Tunable pixel and timing constants for the drag engine, loaded from TOML.

pub mod loader;

pub use loader::{
    apply_env_overrides, default_config_path, default_log_path, load_config_file,
    load_config_with_precedence, merge_config, resolve_config, ConfigError, ConfigFile,
    EngineConfig,
};
