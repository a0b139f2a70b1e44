use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use authwidget_client::History;
use serde::Deserialize;
use sketching::pipeline::start_logging_pipeline;
use sketching::LogLevel;
use tracing::{debug, error, Subscriber};

use crate::manager::Bootstrap;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unable to read configuration {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse configuration {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Options that can be set from a configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetConfig {
    pub component_name: Option<String>,
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Default)]
pub struct BootstrapBuilder {
    component_name: Option<String>,
    log_level: LogLevel,
}

impl Display for BootstrapBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.component_name {
            Some(value) => writeln!(f, "component_name: {}", value)?,
            None => writeln!(f, "component_name: unset")?,
        }
        writeln!(f, "log_level: {}", self.log_level)
    }
}

impl BootstrapBuilder {
    pub fn new() -> Self {
        BootstrapBuilder::default()
    }

    fn apply_config_options(self, wc: WidgetConfig) -> Self {
        let BootstrapBuilder {
            component_name,
            log_level,
        } = self;

        let component_name = match wc.component_name {
            Some(name) => Some(name),
            None => {
                debug!("No component_name in config supplied to apply_config_options");
                component_name
            }
        };
        let log_level = wc.log_level.unwrap_or(log_level);

        BootstrapBuilder {
            component_name,
            log_level,
        }
    }

    /// Apply options from the TOML file at `config_path`. A file that does
    /// not exist leaves the builder unchanged.
    pub fn read_options_from_optional_config<P: AsRef<Path>>(
        self,
        config_path: P,
    ) -> Result<Self, ConfigError> {
        let path = config_path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no widget configuration, using defaults");
                return Ok(self);
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        let config: WidgetConfig = toml::from_str(&contents).map_err(|source| {
            error!(?source, "failed to parse widget configuration");
            ConfigError::Parse {
                path: path.display().to_string(),
                source,
            }
        })?;

        Ok(self.apply_config_options(config))
    }

    pub fn component_name(self, component_name: &str) -> Self {
        BootstrapBuilder {
            component_name: Some(component_name.to_string()),
            log_level: self.log_level,
        }
    }

    pub fn log_level(self, log_level: LogLevel) -> Self {
        BootstrapBuilder {
            component_name: self.component_name,
            log_level,
        }
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Build the logging subscriber for the configured level. Installing it is
    /// left to the host.
    pub fn start_logging(&self) -> Result<Box<dyn Subscriber + Send + Sync>, String> {
        start_logging_pipeline(self.log_level)
    }

    pub fn build<H: History>(self, history: H) -> Bootstrap<H> {
        let component_name = self.component_name.unwrap_or_default();
        Bootstrap::new(&component_name, history)
    }
}
