//! The session state an activation writes into.
//!
//! The slots are owned by the surrounding application. The orchestrator only
//! ever writes to them, once per successful fetch, and never reads back.

use std::cell::{Cell, RefCell};
use std::fmt;

use authwidget_proto::v1::{Config, Emails, User, WebauthnCredentials};
use sketching::{bootstrap_debug, bootstrap_warn};
use tracing::trace;

use crate::page::PageDescriptor;

/// Identifies one activation. Later activations have larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActivationId(u64);

impl ActivationId {
    pub fn new(id: u64) -> Self {
        ActivationId(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActivationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The callbacks an activation reports through. All of them take `&self` so
/// that sibling fetches in one fan-out can commit as they settle. Every write
/// names the activation it belongs to.
pub trait SessionSetters {
    /// Called as an activation starts, before any other setter for it.
    fn begin_activation(&self, _activation: ActivationId) {}

    fn set_config(&self, activation: ActivationId, config: Config);

    fn set_user(&self, activation: ActivationId, user: User);

    fn set_emails(&self, activation: ActivationId, emails: Emails);

    fn set_credentials(&self, activation: ActivationId, credentials: WebauthnCredentials);

    /// Called exactly once per activation.
    fn set_page(&self, activation: ActivationId, page: PageDescriptor);
}

/// A single settable value, and how often it has been written.
#[derive(Debug)]
pub struct Slot<T> {
    value: RefCell<Option<T>>,
    writes: Cell<usize>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot {
            value: RefCell::new(None),
            writes: Cell::new(0),
        }
    }
}

impl<T: Clone> Slot<T> {
    pub fn get(&self) -> Option<T> {
        self.value.borrow().clone()
    }
}

impl<T> Slot<T> {
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn is_set(&self) -> bool {
        self.value.borrow().is_some()
    }

    fn set(&self, value: T) {
        *self.value.borrow_mut() = Some(value);
        self.writes.set(self.writes.get() + 1);
    }
}

/// The default [SessionSetters]. When activations overlap, only the most
/// recently started one may write, for the data slots and the page alike.
#[derive(Debug, Default)]
pub struct SessionState {
    config: Slot<Config>,
    user: Slot<User>,
    emails: Slot<Emails>,
    credentials: Slot<WebauthnCredentials>,
    page: RefCell<Option<(ActivationId, PageDescriptor)>>,
    latest: Cell<Option<ActivationId>>,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState::default()
    }

    pub fn config(&self) -> &Slot<Config> {
        &self.config
    }

    pub fn user(&self) -> &Slot<User> {
        &self.user
    }

    pub fn emails(&self) -> &Slot<Emails> {
        &self.emails
    }

    pub fn credentials(&self) -> &Slot<WebauthnCredentials> {
        &self.credentials
    }

    /// The currently visible page.
    pub fn page(&self) -> Option<PageDescriptor> {
        self.page.borrow().as_ref().map(|(_, page)| page.clone())
    }

    /// The activation that decided the currently visible page.
    pub fn page_activation(&self) -> Option<ActivationId> {
        self.page.borrow().as_ref().map(|(id, _)| *id)
    }

    pub fn latest_activation(&self) -> Option<ActivationId> {
        self.latest.get()
    }

    fn is_superseded(&self, activation: ActivationId, slot: &'static str) -> bool {
        match self.latest.get() {
            Some(latest) if activation < latest => {
                bootstrap_warn!(
                    %activation,
                    %latest,
                    slot,
                    "dropping write from superseded activation"
                );
                true
            }
            _ => false,
        }
    }
}

impl SessionSetters for SessionState {
    fn begin_activation(&self, activation: ActivationId) {
        if self.latest.get().map_or(true, |latest| activation > latest) {
            self.latest.set(Some(activation));
        }
    }

    fn set_config(&self, activation: ActivationId, config: Config) {
        if self.is_superseded(activation, "config") {
            return;
        }
        trace!(%activation, "set_config");
        self.config.set(config)
    }

    fn set_user(&self, activation: ActivationId, user: User) {
        if self.is_superseded(activation, "user") {
            return;
        }
        trace!(%activation, user = %user.id, "set_user");
        self.user.set(user)
    }

    fn set_emails(&self, activation: ActivationId, emails: Emails) {
        if self.is_superseded(activation, "emails") {
            return;
        }
        trace!(%activation, count = emails.len(), "set_emails");
        self.emails.set(emails)
    }

    fn set_credentials(&self, activation: ActivationId, credentials: WebauthnCredentials) {
        if self.is_superseded(activation, "credentials") {
            return;
        }
        trace!(%activation, count = credentials.len(), "set_credentials");
        self.credentials.set(credentials)
    }

    fn set_page(&self, activation: ActivationId, page: PageDescriptor) {
        if self.is_superseded(activation, "page") {
            return;
        }
        bootstrap_debug!(%activation, page = page.name(), "set_page");
        *self.page.borrow_mut() = Some((activation, page));
    }
}
