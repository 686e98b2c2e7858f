//! Application settings

use serde::{Deserialize, Serialize};

use crate::explode::ExplodeConfig;

fn default_log_filter() -> String {
    "partscope_lib=info".to_string()
}

/// All application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Exploded-view layout tuning
    #[serde(default)]
    pub explode: ExplodeConfig,
    /// Default tracing filter used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            explode: ExplodeConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl AppSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("com", "partscope", "partscope") {
            let config_path = dirs.config_dir().join("settings.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    return settings;
                }
                tracing::warn!("ignoring malformed settings at {}", config_path.display());
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = directories::ProjectDirs::from("com", "partscope", "partscope") {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    let _ = std::fs::write(config_path, json);
                }
            }
        }
    }
}
