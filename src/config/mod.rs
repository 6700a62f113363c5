//! Configuration module for mdexec.
//!
//! Handles the platform endpoint, polling and logging settings.

mod settings;

pub use settings::{
    expand_env_vars, LoggingSettings, PlatformSettings, PollSettings, Settings, SettingsError,
};
