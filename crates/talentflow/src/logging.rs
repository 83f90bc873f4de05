//! Subscriber setup for the `log` records emitted by this crate.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::config::LoggingConfig;
use crate::error::{Result, TalentflowError};

/// `RUST_LOG` when set, otherwise the configured level.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Installs a global fmt subscriber and routes `log` records into it.
///
/// Fails if a global logger or subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if config.json {
        fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let subscriber = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter(config));

    tracing_log::LogTracer::init().map_err(|e| TalentflowError::Logging(e.to_string()))?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| TalentflowError::Logging(e.to_string()))?;

    tracing::info!(
        level = %config.level,
        json_format = config.json,
        "Logging initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_falls_back_to_config_level() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = LoggingConfig {
            level: "talentflow=debug".to_string(),
            json: false,
        };
        assert_eq!(env_filter(&config).to_string(), "talentflow=debug");
    }
}
