use tracing::Subscriber;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::{prelude::*, Registry};

use crate::LogLevel;

/// This does all the startup things for the logging pipeline. The returned
/// subscriber still needs to be installed by the caller.
pub fn start_logging_pipeline(
    log_filter: LogLevel,
) -> Result<Box<dyn Subscriber + Send + Sync>, String> {
    let logging_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(log_filter).into())
        .from_env()
        .map_err(|err| format!("Failed to create logging filter: {}", err))?;

    let forest_layer = tracing_forest::ForestLayer::default().with_filter(logging_filter);
    Ok(Box::new(Registry::default().with(forest_layer)))
}
