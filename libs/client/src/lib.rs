//! The capabilities the widget consumes from the identity backend.
//!
//! Nothing in here talks to a network. Implementations of [IdentityClient]
//! and [History] are provided by whatever hosts the widget.

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

#[macro_use]
extern crate tracing;

use async_trait::async_trait;
use authwidget_proto::thirdparty::ThirdPartyError;
use authwidget_proto::v1::{Config, Emails, User, WebauthnCredentials};
use url::Url;

/// Every failure an identity client call can report. This is handed to the
/// error page as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("third party login failed: {0}")]
    ThirdParty(ThirdPartyError),
    #[error("unauthorized")]
    Unauthorized,
    #[error("session expired")]
    SessionExpired,
    #[error("not found")]
    NotFound,
    #[error("http error {status}: {message}")]
    Http { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("webauthn is not supported by this browser")]
    WebauthnUnsupported,
    #[error("technical error: {0}")]
    Technical(String),
}

impl ClientError {
    /// True when the failure just means nobody is logged in.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ClientError::Unauthorized | ClientError::SessionExpired)
    }
}

impl From<ThirdPartyError> for ClientError {
    fn from(e: ThirdPartyError) -> Self {
        ClientError::ThirdParty(e)
    }
}

#[async_trait(?Send)]
pub trait IdentityClient {
    /// A third party login error recorded by an earlier provider redirect.
    fn third_party_error(&self) -> Option<ClientError>;

    /// Fails if the session token is absent, invalid or expired.
    async fn validate_token(&self) -> Result<(), ClientError>;

    async fn get_config(&self) -> Result<Config, ClientError>;

    /// Fails if there is no authenticated session.
    async fn get_current_user(&self) -> Result<User, ClientError>;

    async fn list_emails(&self) -> Result<Emails, ClientError>;

    async fn list_credentials(&self) -> Result<WebauthnCredentials, ClientError>;

    /// Should `user` be offered to register a passkey after logging in?
    async fn should_register_passkey(&self, user: &User) -> Result<bool, ClientError>;
}

/// The browser's session history, reduced to what the widget needs.
pub trait History {
    fn current_url(&self) -> Url;

    /// Replace the current history entry. No navigation happens.
    fn replace_state(&self, path: &str);
}

/// Read the third party error markers from the current location. Identity
/// clients running in a browser can use this to back
/// [IdentityClient::third_party_error].
pub fn third_party_error_from_location<H: History + ?Sized>(history: &H) -> Option<ClientError> {
    let url = history.current_url();
    let e = ThirdPartyError::from_url(&url)?;
    trace!(?e, "found third party error markers in location");
    Some(ClientError::ThirdParty(e))
}
