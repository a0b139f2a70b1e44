#![deny(warnings)]
#![warn(unused_extern_crates)]
#![allow(non_snake_case)]
use std::fmt;
use std::str::FromStr;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Deserialize;
use tracing_forest::printer::TestCapturePrinter;
use tracing_forest::tag::NoTag;
use tracing_forest::ForestLayer;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;

pub mod macros;
pub mod pipeline;

pub use {tracing, tracing_forest, tracing_subscriber};

/// Start up the logging for test mode.
pub fn test_init() {
    let filter = EnvFilter::from_default_env().add_directive(LevelFilter::TRACE.into());

    // start the logging!
    let _ = tracing_subscriber::Registry::default()
        .with(ForestLayer::new(TestCapturePrinter::new(), NoTag).with_filter(filter))
        .try_init();
}

#[derive(Clone, Copy, Deserialize, Debug, Default, PartialEq, Eq)]
pub enum LogLevel {
    #[default]
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "debug")]
    Debug,
    #[serde(rename = "trace")]
    Trace,
}

impl FromStr for LogLevel {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err("Must be one of info, debug, trace"),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        })
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Tags attached to events emitted through the macros in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u64)]
pub enum EventTag {
    BootstrapDebug,
    BootstrapInfo,
    BootstrapWarn,
    BootstrapError,
    SecurityInfo,
}

impl EventTag {
    pub fn pretty(self) -> &'static str {
        match self {
            EventTag::BootstrapDebug => "bootstrap.debug",
            EventTag::BootstrapInfo => "bootstrap.info",
            EventTag::BootstrapWarn => "bootstrap.warn",
            EventTag::BootstrapError => "bootstrap.error",
            EventTag::SecurityInfo => "security.info",
        }
    }

    pub fn emoji(self) -> &'static str {
        use EventTag::*;
        match self {
            BootstrapDebug => "🐛",
            BootstrapError => "🚨",
            BootstrapWarn => "⚠️",
            BootstrapInfo | SecurityInfo => "ℹ️",
        }
    }
}
