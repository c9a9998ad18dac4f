use changelog::ChangelogConfig;
use serde::Deserialize;
use std::path::Path;

/// Settings read from the optional `.actions-kit.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub changelog: ChangelogConfig,
}

/// Returns the file content, or `None` when the file cannot be read
fn load_config_file(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            log::debug!("Loaded config from {}", path.display());
            Some(content)
        }
        Err(e) => {
            log::debug!("No config at {}: {e}", path.display());
            None
        }
    }
}

impl AppConfig {
    /// Load config from `path`, or use defaults
    pub fn load(path: &Path) -> Self {
        if let Some(content) = load_config_file(path) {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {}: {}", path.display(), e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }
}
