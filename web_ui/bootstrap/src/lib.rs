//! Session bootstrap for the authwidget web ui.
//!
//! When the widget activates, [Bootstrap] works out from the identity
//! backend alone which single page to show: an error, the login email step,
//! the post login steps, or the profile.

#![deny(warnings)]
#![warn(unused_extern_crates)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unreachable)]
#![deny(clippy::await_holding_lock)]
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::trivially_copy_pass_by_ref)]

pub mod config;
pub mod manager;
pub mod mode;
pub mod page;
mod pipeline;
pub mod resolve;
pub mod state;

pub use crate::config::{BootstrapBuilder, ConfigError, WidgetConfig};
pub use crate::manager::Bootstrap;
pub use crate::mode::OperatingMode;
pub use crate::page::{PageDescriptor, PipelinePhase};
pub use crate::state::{ActivationId, SessionSetters, SessionState};
