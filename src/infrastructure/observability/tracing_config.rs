use crate::presentation::config::{Environment, LoggingSettings};

/// Subscriber options resolved from settings.
pub struct TracingConfig {
    pub environment: Environment,
    pub level: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub fn from_settings(environment: Environment, logging: &LoggingSettings) -> Self {
        Self {
            environment,
            level: logging.level.clone(),
            json_format: logging.json_format,
        }
    }

    /// `RUST_LOG` wins over the configured level when set.
    pub fn default_directive(&self) -> String {
        format!(
            "{level},finsight={level},tower_http=debug",
            level = self.level
        )
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            level: "info".to_string(),
            json_format: false,
        }
    }
}
