//! Decides, once per activation, which page the widget shows next.

use std::cell::Cell;

use authwidget_client::{History, IdentityClient};
use sketching::bootstrap_info;
use tracing::{debug, info_span, Instrument};

use crate::mode::OperatingMode;
use crate::page::PageDescriptor;
use crate::pipeline;
use crate::state::{ActivationId, SessionSetters};

pub struct Bootstrap<H> {
    component_name: String,
    mode: Option<OperatingMode>,
    history: H,
    activations: Cell<u64>,
}

impl<H: History> Bootstrap<H> {
    pub fn new(component_name: &str, history: H) -> Self {
        let mode = OperatingMode::from_component_name(component_name);
        if mode.is_none() {
            debug!(%component_name, "no bootstrap pipeline for component");
        }
        Bootstrap {
            component_name: component_name.to_string(),
            mode,
            history,
            activations: Cell::new(0),
        }
    }

    pub fn mode(&self) -> Option<OperatingMode> {
        self.mode
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    fn next_activation(&self) -> ActivationId {
        let next = self.activations.get() + 1;
        self.activations.set(next);
        ActivationId::new(next)
    }

    /// Run the pipeline for this widget's mode and report the resulting page
    /// through `state`.
    ///
    /// Nothing happens until `client` is available, and nothing happens for
    /// an unrecognised component. Otherwise `set_page` is called exactly once,
    /// after every fetch the pipeline issued has settled. Activating again
    /// while an earlier activation is still in flight is allowed: the earlier
    /// one is not cancelled, but its id is older and `state` can tell.
    pub async fn activate<C, S>(&self, client: Option<&C>, state: &S) -> Option<ActivationId>
    where
        C: IdentityClient + ?Sized,
        S: SessionSetters + ?Sized,
    {
        let Some(client) = client else {
            debug!("identity client not available yet");
            return None;
        };

        let Some(mode) = self.mode else {
            debug!(component_name = %self.component_name, "nothing to activate");
            return None;
        };

        let activation = self.next_activation();
        state.begin_activation(activation);

        let span = info_span!("activate", %activation, %mode);
        let page = async {
            match mode {
                OperatingMode::Auth => {
                    pipeline::auth(activation, client, state, &self.history).await
                }
                OperatingMode::Profile => pipeline::profile(activation, client, state).await,
            }
        }
        .instrument(span)
        .await;

        match &page {
            PageDescriptor::Error(cause) => {
                bootstrap_info!(%activation, %mode, ?cause, "activation failed")
            }
            page => bootstrap_info!(%activation, %mode, page = page.name(), "activation resolved"),
        }

        state.set_page(activation, page);
        Some(activation)
    }
}
