//! Third party (identity provider) login failures.
//!
//! After a failed provider redirect the backend sends the browser back to the
//! widget with `?error=<code>&error_description=<text>` appended. Those
//! markers are transient: once consumed they must be removed from the visible
//! address so a reload doesn't show the same failure again.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{QUERY_THIRD_PARTY_ERROR, QUERY_THIRD_PARTY_ERROR_DESCRIPTION};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ThirdPartyErrorCode {
    InvalidRequest,
    ServerError,
    AccessDenied,
    UserConflict,
    MultipleAccounts,
    UnverifiedEmail,
    EmailMaxNum,
    Other(String),
}

impl ThirdPartyErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            ThirdPartyErrorCode::InvalidRequest => "invalid_request",
            ThirdPartyErrorCode::ServerError => "server_error",
            ThirdPartyErrorCode::AccessDenied => "access_denied",
            ThirdPartyErrorCode::UserConflict => "user_conflict",
            ThirdPartyErrorCode::MultipleAccounts => "multiple_accounts",
            ThirdPartyErrorCode::UnverifiedEmail => "unverified_email",
            ThirdPartyErrorCode::EmailMaxNum => "email_maxnum",
            ThirdPartyErrorCode::Other(code) => code.as_str(),
        }
    }
}

impl From<&str> for ThirdPartyErrorCode {
    fn from(s: &str) -> Self {
        match s {
            "invalid_request" => ThirdPartyErrorCode::InvalidRequest,
            "server_error" => ThirdPartyErrorCode::ServerError,
            "access_denied" => ThirdPartyErrorCode::AccessDenied,
            "user_conflict" => ThirdPartyErrorCode::UserConflict,
            "multiple_accounts" => ThirdPartyErrorCode::MultipleAccounts,
            "unverified_email" => ThirdPartyErrorCode::UnverifiedEmail,
            "email_maxnum" => ThirdPartyErrorCode::EmailMaxNum,
            other => ThirdPartyErrorCode::Other(other.to_string()),
        }
    }
}

impl From<String> for ThirdPartyErrorCode {
    fn from(s: String) -> Self {
        ThirdPartyErrorCode::from(s.as_str())
    }
}

impl From<ThirdPartyErrorCode> for String {
    fn from(code: ThirdPartyErrorCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for ThirdPartyErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ThirdPartyError {
    pub code: ThirdPartyErrorCode,
    pub description: Option<String>,
}

impl ThirdPartyError {
    /// Extract the error markers from a location, if there are any.
    pub fn from_url(url: &Url) -> Option<Self> {
        let mut code = None;
        let mut description = None;

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                QUERY_THIRD_PARTY_ERROR => code = Some(value.into_owned()),
                QUERY_THIRD_PARTY_ERROR_DESCRIPTION => description = Some(value.into_owned()),
                _ => {}
            }
        }

        code.filter(|c| !c.is_empty()).map(|c| ThirdPartyError {
            code: ThirdPartyErrorCode::from(c),
            description: description.filter(|d| !d.is_empty()),
        })
    }
}

impl fmt::Display for ThirdPartyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{} ({})", self.code, description),
            None => write!(f, "{}", self.code),
        }
    }
}

/// The address to put back into the history entry once the markers are
/// consumed. Only the path survives, the query and fragment are dropped.
pub fn strip_transient_markers(url: &Url) -> String {
    url.path().to_string()
}
