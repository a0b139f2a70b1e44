use authwidget_client::ClientError;
use sketching::bootstrap_error;
use tracing::debug;

use crate::state::ActivationId;

/// The single next UI state decided by an activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageDescriptor {
    /// The failure cause is exactly what the identity client reported.
    Error(ClientError),
    LoginEmail,
    LoginFinished,
    RegisterPasskey,
    Profile,
}

impl PageDescriptor {
    pub fn is_error(&self) -> bool {
        matches!(self, PageDescriptor::Error(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            PageDescriptor::Error(_) => "error",
            PageDescriptor::LoginEmail => "login_email",
            PageDescriptor::LoginFinished => "login_finished",
            PageDescriptor::RegisterPasskey => "register_passkey",
            PageDescriptor::Profile => "profile",
        }
    }
}

/// Where a pipeline is. Phases only ever move forward, and `Resolved` and
/// `Failed` are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelinePhase {
    NotStarted,
    AwaitingPreconditions,
    AwaitingParallelFetch,
    Resolved,
    Failed,
}

impl PipelinePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelinePhase::Resolved | PipelinePhase::Failed)
    }

    pub fn can_advance_to(self, next: PipelinePhase) -> bool {
        !self.is_terminal() && next > self
    }
}

/// Follows one pipeline run through its phases.
#[derive(Debug)]
pub(crate) struct PhaseTracker {
    activation: ActivationId,
    phase: PipelinePhase,
}

impl PhaseTracker {
    pub(crate) fn new(activation: ActivationId) -> Self {
        PhaseTracker {
            activation,
            phase: PipelinePhase::NotStarted,
        }
    }

    pub(crate) fn phase(&self) -> PipelinePhase {
        self.phase
    }

    pub(crate) fn advance(&mut self, next: PipelinePhase) {
        if self.phase.can_advance_to(next) {
            debug!(activation = %self.activation, from = ?self.phase, to = ?next, "phase");
            self.phase = next;
        } else {
            bootstrap_error!(
                activation = %self.activation,
                from = ?self.phase,
                to = ?next,
                "invalid pipeline phase transition, ignoring"
            );
        }
    }

    /// Move to the terminal phase matching the decided page.
    pub(crate) fn finish(&mut self, page: &PageDescriptor) {
        if page.is_error() {
            self.advance(PipelinePhase::Failed)
        } else {
            self.advance(PipelinePhase::Resolved)
        }
    }
}
