use std::path::Path;

use crate::config::schema::Config;
use crate::error::ConfigError;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    let rate = config.backend.job_list_failure_rate;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::Validation {
            message: format!("backend.job_list_failure_rate must be within [0, 1], got {}", rate),
        });
    }

    if config.backend.namespace.trim_matches('/').is_empty() {
        return Err(ConfigError::Validation {
            message: "backend.namespace must not be empty".to_string(),
        });
    }

    let fixtures = &config.fixtures;
    if fixtures.candidates_min > fixtures.candidates_max {
        return Err(ConfigError::Validation {
            message: format!(
                "fixtures.candidates_min ({}) exceeds fixtures.candidates_max ({})",
                fixtures.candidates_min, fixtures.candidates_max
            ),
        });
    }

    let storage = &config.storage;
    if storage.preferences_key.is_empty() || storage.snapshot_key.is_empty() {
        return Err(ConfigError::Validation {
            message: "storage keys must not be empty".to_string(),
        });
    }
    if storage.preferences_key == storage.snapshot_key {
        return Err(ConfigError::Validation {
            message: format!(
                "storage.preferences_key and storage.snapshot_key must differ ('{}')",
                storage.preferences_key
            ),
        });
    }

    Ok(())
}
