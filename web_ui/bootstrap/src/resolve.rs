//! Deciding the next page from settled outcomes.
//!
//! Nothing here performs a fetch or touches session state, so every branch
//! can be checked directly against collected outcomes.

use std::cell::Cell;
use std::future::Future;

use authwidget_client::ClientError;
use authwidget_proto::v1::User;

use crate::page::PageDescriptor;

/// A settled fetch, and its position in the order its fan-out settled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled<T> {
    pub seq: usize,
    pub outcome: Result<T, ClientError>,
}

impl<T> Settled<T> {
    pub fn new(seq: usize, outcome: Result<T, ClientError>) -> Self {
        Settled { seq, outcome }
    }
}

/// Hands out settle sequence numbers to the members of one fan-out.
#[derive(Debug, Default)]
pub struct SettleOrder {
    next: Cell<usize>,
}

impl SettleOrder {
    pub fn new() -> Self {
        SettleOrder::default()
    }

    /// Drive `fut` to completion and stamp it with the order it settled in.
    pub async fn observe<T, F>(&self, fut: F) -> Settled<T>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        let outcome = fut.await;
        let seq = self.next.get();
        self.next.set(seq + 1);
        Settled { seq, outcome }
    }
}

/// What the login pipeline does after the config/user fan-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStep {
    Page(PageDescriptor),
    /// Logged in, ask about passkey registration for this user.
    AfterLogin(User),
}

/// Config failure always wins. A failed user lookup with a good config is
/// the ordinary "not logged in" case.
pub fn resolve_auth_fetch(
    config: Result<(), ClientError>,
    user: Result<User, ClientError>,
) -> AuthStep {
    if let Err(cause) = config {
        return AuthStep::Page(PageDescriptor::Error(cause));
    }

    match user {
        Ok(user) => AuthStep::AfterLogin(user),
        Err(_) => AuthStep::Page(PageDescriptor::LoginEmail),
    }
}

pub fn resolve_registration(should_register: Result<bool, ClientError>) -> PageDescriptor {
    match should_register {
        Ok(true) => PageDescriptor::RegisterPasskey,
        Ok(false) => PageDescriptor::LoginFinished,
        Err(cause) => PageDescriptor::Error(cause),
    }
}

/// All fetches must succeed. Otherwise the earliest settled failure is the
/// cause.
pub fn resolve_profile_fetch<I>(outcomes: I) -> PageDescriptor
where
    I: IntoIterator<Item = Settled<()>>,
{
    outcomes
        .into_iter()
        .filter_map(|settled| settled.outcome.err().map(|cause| (settled.seq, cause)))
        .min_by_key(|(seq, _)| *seq)
        .map_or(PageDescriptor::Profile, |(_, cause)| {
            PageDescriptor::Error(cause)
        })
}
