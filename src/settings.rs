//! Settings loading.
//!
//! Settings live in a JSON file under the platform config directory.
//! The path can be overridden through `ONBOARD_SETTINGS_PATH`, which
//! is also how tests point the loader at a scratch file. A missing
//! file yields the built-in defaults; a present but unreadable file
//! is an error, never a silent reset.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use ob_core::AppConfig;

/// Global settings instance, populated by [`load_settings`].
pub static SETTINGS: Lazy<RwLock<AppConfig>> = Lazy::new(|| RwLock::new(AppConfig::default()));

/// Platform config directory for this app.
pub fn get_config_dir() -> Result<PathBuf> {
    let base_dir =
        dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
    Ok(base_dir.join("onboard"))
}

/// Settings file path, `ONBOARD_SETTINGS_PATH` taking precedence.
pub fn get_settings_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("ONBOARD_SETTINGS_PATH") {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("settings.json"))
}

/// Load settings from disk and publish them to [`SETTINGS`].
pub fn load_settings() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let path = get_settings_path()?;
    let settings = if path.exists() {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?
    } else {
        AppConfig::default()
    };

    if let Ok(mut global) = SETTINGS.write() {
        *global = settings.clone();
    }
    Ok(settings)
}
