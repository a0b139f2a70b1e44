use std::fmt;
use std::str::FromStr;

use authwidget_proto::constants::{COMPONENT_AUTH, COMPONENT_PROFILE};

/// Which pipeline runs when the widget activates. Fixed when the widget is
/// created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    Auth,
    Profile,
}

impl OperatingMode {
    /// Map a widget component name onto a mode. Anything unknown maps to
    /// `None`, which means "do nothing" rather than "fail".
    pub fn from_component_name(name: &str) -> Option<Self> {
        match name {
            COMPONENT_AUTH => Some(OperatingMode::Auth),
            COMPONENT_PROFILE => Some(OperatingMode::Profile),
            _ => None,
        }
    }
}

impl FromStr for OperatingMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperatingMode::from_component_name(s).ok_or("Must be one of auth, profile")
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatingMode::Auth => f.write_str(COMPONENT_AUTH),
            OperatingMode::Profile => f.write_str(COMPONENT_PROFILE),
        }
    }
}
