//! The two activation pipelines.
//!
//! Each resource is fetched and, if it arrived, committed to the session
//! state as soon as that fetch settles. The page is decided afterwards from
//! the collected outcomes, see [crate::resolve].

use authwidget_client::{ClientError, History, IdentityClient};
use authwidget_proto::thirdparty::strip_transient_markers;
use sketching::{bootstrap_warn, security_info};
use tracing::debug;

use crate::page::{PageDescriptor, PhaseTracker, PipelinePhase};
use crate::resolve::{
    resolve_auth_fetch, resolve_profile_fetch, resolve_registration, AuthStep, SettleOrder,
};
use crate::state::{ActivationId, SessionSetters};

pub(crate) async fn auth<C, S, H>(
    activation: ActivationId,
    client: &C,
    state: &S,
    history: &H,
) -> PageDescriptor
where
    C: IdentityClient + ?Sized,
    S: SessionSetters + ?Sized,
    H: History + ?Sized,
{
    let mut tracker = PhaseTracker::new(activation);
    tracker.advance(PipelinePhase::AwaitingPreconditions);
    let page = auth_steps(activation, client, state, history, &mut tracker).await;
    tracker.finish(&page);
    debug!(phase = ?tracker.phase(), "auth pipeline settled");
    page
}

async fn auth_steps<C, S, H>(
    activation: ActivationId,
    client: &C,
    state: &S,
    history: &H,
    tracker: &mut PhaseTracker,
) -> PageDescriptor
where
    C: IdentityClient + ?Sized,
    S: SessionSetters + ?Sized,
    H: History + ?Sized,
{
    if let Some(cause) = client.third_party_error() {
        let url = history.current_url();
        history.replace_state(&strip_transient_markers(&url));
        security_info!(?cause, "consumed third party login error");
        return PageDescriptor::Error(cause);
    }

    if let Err(cause) = client.validate_token().await {
        debug!(?cause, "token validation failed");
        return PageDescriptor::Error(cause);
    }

    tracker.advance(PipelinePhase::AwaitingParallelFetch);
    let (config, user) = futures::join!(
        async {
            let config = client.get_config().await?;
            state.set_config(activation, config);
            Ok::<_, ClientError>(())
        },
        async {
            let user = client.get_current_user().await?;
            state.set_user(activation, user.clone());
            Ok::<_, ClientError>(user)
        },
    );

    if let (Ok(()), Err(cause)) = (&config, &user) {
        debug!(
            ?cause,
            unauthenticated = cause.is_unauthenticated(),
            "no current user, continuing to login"
        );
    }

    match resolve_auth_fetch(config, user) {
        AuthStep::Page(page) => page,
        AuthStep::AfterLogin(user) => {
            resolve_registration(client.should_register_passkey(&user).await)
        }
    }
}

pub(crate) async fn profile<C, S>(
    activation: ActivationId,
    client: &C,
    state: &S,
) -> PageDescriptor
where
    C: IdentityClient + ?Sized,
    S: SessionSetters + ?Sized,
{
    let mut tracker = PhaseTracker::new(activation);
    tracker.advance(PipelinePhase::AwaitingParallelFetch);

    let order = SettleOrder::new();
    let (config, user, emails, credentials) = futures::join!(
        order.observe(async {
            state.set_config(activation, client.get_config().await?);
            Ok::<_, ClientError>(())
        }),
        order.observe(async {
            state.set_user(activation, client.get_current_user().await?);
            Ok::<_, ClientError>(())
        }),
        order.observe(async {
            state.set_emails(activation, client.list_emails().await?);
            Ok::<_, ClientError>(())
        }),
        order.observe(async {
            state.set_credentials(activation, client.list_credentials().await?);
            Ok::<_, ClientError>(())
        }),
    );

    let outcomes = [
        ("config", config),
        ("user", user),
        ("emails", emails),
        ("credentials", credentials),
    ];
    for (resource, settled) in outcomes.iter() {
        if let Err(cause) = &settled.outcome {
            bootstrap_warn!(
                resource = *resource,
                seq = settled.seq,
                ?cause,
                "profile fetch failed"
            );
        }
    }

    let page = resolve_profile_fetch(outcomes.into_iter().map(|(_, settled)| settled));
    tracker.finish(&page);
    debug!(phase = ?tracker.phase(), "profile pipeline settled");
    page
}
