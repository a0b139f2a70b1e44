#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use authwidget_bootstrap::{ActivationId, PageDescriptor, SessionSetters, SessionState};
use authwidget_client::{ClientError, History, IdentityClient};
use authwidget_proto::v1::{
    AccountConfig, Config, CredentialRef, Email, EmailConfig, Emails, PasswordConfig, User,
    WebauthnCredential, WebauthnCredentials,
};
use url::Url;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    ThirdPartyError,
    ValidateToken,
    GetConfig,
    GetCurrentUser,
    ListEmails,
    ListCredentials,
    ShouldRegisterPasskey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Issued(Call),
    Settled(Call),
    Set(&'static str),
    Page(ActivationId, PageDescriptor),
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn position(log: &EventLog, event: &Event) -> Option<usize> {
    log.borrow().iter().position(|e| e == event)
}

pub fn count(log: &EventLog, event: &Event) -> usize {
    log.borrow().iter().filter(|e| *e == event).count()
}

/// Every client call that was issued, in order.
pub fn issued(log: &EventLog) -> Vec<Call> {
    log.borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Issued(call) => Some(*call),
            _ => None,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Reply<T> {
    pub result: Result<T, ClientError>,
    pub delay_ms: u64,
}

impl<T> Reply<T> {
    pub fn ok(value: T) -> Self {
        Reply {
            result: Ok(value),
            delay_ms: 0,
        }
    }

    pub fn err(cause: ClientError) -> Self {
        Reply {
            result: Err(cause),
            delay_ms: 0,
        }
    }

    pub fn after(self, delay_ms: u64) -> Self {
        Reply { delay_ms, ..self }
    }
}

/// An identity client that answers from a fixed script and records every
/// call in the shared event log.
pub struct ScriptedClient {
    pub third_party: Option<ClientError>,
    pub validate: Reply<()>,
    pub config: Reply<Config>,
    pub user: Reply<User>,
    pub emails: Reply<Emails>,
    pub credentials: Reply<WebauthnCredentials>,
    pub should_register: Reply<bool>,
    log: EventLog,
}

impl ScriptedClient {
    /// A client for a logged in user where every call succeeds.
    pub fn logged_in(log: &EventLog) -> Self {
        ScriptedClient {
            third_party: None,
            validate: Reply::ok(()),
            config: Reply::ok(config()),
            user: Reply::ok(user()),
            emails: Reply::ok(emails()),
            credentials: Reply::ok(credentials()),
            should_register: Reply::ok(false),
            log: log.clone(),
        }
    }

    async fn reply<T: Clone>(&self, call: Call, reply: &Reply<T>) -> Result<T, ClientError> {
        self.log.borrow_mut().push(Event::Issued(call));
        if reply.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(reply.delay_ms)).await;
        } else {
            tokio::task::yield_now().await;
        }
        self.log.borrow_mut().push(Event::Settled(call));
        reply.result.clone()
    }
}

#[async_trait(?Send)]
impl IdentityClient for ScriptedClient {
    fn third_party_error(&self) -> Option<ClientError> {
        self.log
            .borrow_mut()
            .push(Event::Issued(Call::ThirdPartyError));
        self.third_party.clone()
    }

    async fn validate_token(&self) -> Result<(), ClientError> {
        self.reply(Call::ValidateToken, &self.validate).await
    }

    async fn get_config(&self) -> Result<Config, ClientError> {
        self.reply(Call::GetConfig, &self.config).await
    }

    async fn get_current_user(&self) -> Result<User, ClientError> {
        self.reply(Call::GetCurrentUser, &self.user).await
    }

    async fn list_emails(&self) -> Result<Emails, ClientError> {
        self.reply(Call::ListEmails, &self.emails).await
    }

    async fn list_credentials(&self) -> Result<WebauthnCredentials, ClientError> {
        self.reply(Call::ListCredentials, &self.credentials).await
    }

    async fn should_register_passkey(&self, _user: &User) -> Result<bool, ClientError> {
        self.reply(Call::ShouldRegisterPasskey, &self.should_register)
            .await
    }
}

/// Wraps [SessionState] and records every setter call in the event log.
pub struct RecordingState {
    pub inner: SessionState,
    log: EventLog,
}

impl RecordingState {
    pub fn new(log: &EventLog) -> Self {
        RecordingState {
            inner: SessionState::new(),
            log: log.clone(),
        }
    }

    pub fn pages(&self) -> Vec<(ActivationId, PageDescriptor)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Page(id, page) => Some((*id, page.clone())),
                _ => None,
            })
            .collect()
    }
}

impl SessionSetters for RecordingState {
    fn begin_activation(&self, activation: ActivationId) {
        self.inner.begin_activation(activation)
    }

    fn set_config(&self, activation: ActivationId, config: Config) {
        self.log.borrow_mut().push(Event::Set("config"));
        self.inner.set_config(activation, config)
    }

    fn set_user(&self, activation: ActivationId, user: User) {
        self.log.borrow_mut().push(Event::Set("user"));
        self.inner.set_user(activation, user)
    }

    fn set_emails(&self, activation: ActivationId, emails: Emails) {
        self.log.borrow_mut().push(Event::Set("emails"));
        self.inner.set_emails(activation, emails)
    }

    fn set_credentials(&self, activation: ActivationId, credentials: WebauthnCredentials) {
        self.log.borrow_mut().push(Event::Set("credentials"));
        self.inner.set_credentials(activation, credentials)
    }

    fn set_page(&self, activation: ActivationId, page: PageDescriptor) {
        self.log
            .borrow_mut()
            .push(Event::Page(activation, page.clone()));
        self.inner.set_page(activation, page)
    }
}

pub struct TestHistory {
    url: RefCell<Url>,
    pub replaced: RefCell<Vec<String>>,
}

impl TestHistory {
    pub fn at(url: &str) -> Self {
        TestHistory {
            url: RefCell::new(Url::parse(url).expect("invalid test url")),
            replaced: RefCell::new(Vec::new()),
        }
    }
}

impl History for TestHistory {
    fn current_url(&self) -> Url {
        self.url.borrow().clone()
    }

    fn replace_state(&self, path: &str) {
        let next = self.url.borrow().join(path).expect("invalid path");
        *self.url.borrow_mut() = next;
        self.replaced.borrow_mut().push(path.to_string());
    }
}

pub fn config() -> Config {
    Config {
        password: PasswordConfig {
            enabled: true,
            min_password_length: 8,
        },
        emails: EmailConfig {
            require_verification: true,
            max_num_of_addresses: 5,
        },
        providers: vec!["google".to_string()],
        account: AccountConfig {
            allow_deletion: false,
            allow_signup: true,
        },
    }
}

pub fn user() -> User {
    User {
        id: Uuid::from_u128(0x1fb1f8b4_0d1c_4a4e_a4f5_6a5a5e0f3c11),
        email_id: Some(Uuid::from_u128(1)),
        webauthn_credentials: vec![CredentialRef {
            id: "cred-1".to_string(),
        }],
    }
}

pub fn emails() -> Emails {
    vec![Email {
        id: Uuid::from_u128(1),
        address: "ada@example.com".to_string(),
        is_verified: true,
        is_primary: true,
    }]
}

pub fn credentials() -> WebauthnCredentials {
    vec![WebauthnCredential {
        id: "cred-1".to_string(),
        name: Some("laptop".to_string()),
        public_key: "pk".to_string(),
        attestation_type: "none".to_string(),
        aaguid: Uuid::nil(),
        created_at: time::OffsetDateTime::UNIX_EPOCH,
        transports: vec!["internal".to_string()],
    }]
}
