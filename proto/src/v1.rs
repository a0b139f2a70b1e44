use serde::{Deserialize, Serialize};
use uuid::Uuid;

/* ===== configuration ===== */

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    pub enabled: bool,
    pub min_password_length: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub require_verification: bool,
    pub max_num_of_addresses: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AccountConfig {
    pub allow_deletion: bool,
    pub allow_signup: bool,
}

/// The widget configuration as served by the identity backend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub password: PasswordConfig,
    pub emails: EmailConfig,
    /// Names of the enabled third party identity providers.
    #[serde(default)]
    pub providers: Vec<String>,
    pub account: AccountConfig,
}

/* ===== users ===== */

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CredentialRef {
    pub id: String,
}

/// The currently authenticated user.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email_id: Option<Uuid>,
    #[serde(default)]
    pub webauthn_credentials: Vec<CredentialRef>,
}

impl User {
    pub fn has_passkeys(&self) -> bool {
        !self.webauthn_credentials.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Email {
    pub id: Uuid,
    pub address: String,
    pub is_verified: bool,
    pub is_primary: bool,
}

pub type Emails = Vec<Email>;

pub fn primary_email(emails: &[Email]) -> Option<&Email> {
    emails.iter().find(|e| e.is_primary)
}

/// A registered passkey, as listed on the profile page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WebauthnCredential {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub public_key: String,
    pub attestation_type: String,
    pub aaguid: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(default)]
    pub transports: Vec<String>,
}

pub type WebauthnCredentials = Vec<WebauthnCredential>;
