//! Step protocol and the typed context shared between pipeline steps.
//!
//! An image build is a sequence of steps driven by an external orchestrator:
//! each step's forward action either continues the pipeline or halts it, and
//! during teardown the orchestrator invokes cleanup across the steps that
//! already ran, in reverse order. Steps communicate through the typed slots
//! of [`BuildContext`].

use std::future::Future;
use std::net::IpAddr;
use std::pin::Pin;

use crate::eip::EipError;
use crate::ui::Ui;

/// Future returned by step operations.
pub type StepFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Signal a step's forward action returns to the orchestrator.
#[derive(Clone, Debug, Eq, PartialEq)]
#[must_use]
pub enum StepOutcome {
    /// The step succeeded; the orchestrator proceeds to the next step.
    Continue,
    /// The step failed; the orchestrator stops the pipeline and unwinds
    /// cleanup over the completed steps.
    Halt(EipError),
}

impl StepOutcome {
    /// Returns `true` when the outcome continues the pipeline.
    #[must_use]
    pub const fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    /// Returns `true` when the outcome halts the pipeline.
    #[must_use]
    pub const fn is_halt(&self) -> bool {
        matches!(self, Self::Halt(_))
    }
}

/// Compute instance created by an earlier provisioning step.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstanceDescriptor {
    /// Provider identifier for the instance.
    pub instance_id: String,
    /// Private addresses assigned inside the instance's network, if any.
    pub private_addresses: Vec<IpAddr>,
}

impl InstanceDescriptor {
    /// Describes an instance by its identifier and private addresses.
    #[must_use]
    pub fn new(instance_id: impl Into<String>, private_addresses: Vec<IpAddr>) -> Self {
        Self {
            instance_id: instance_id.into(),
            private_addresses,
        }
    }

    /// Returns the instance's first private address, when it has one.
    #[must_use]
    pub fn first_private_address(&self) -> Option<IpAddr> {
        self.private_addresses.first().copied()
    }
}

/// Typed execution context threaded through the steps of one pipeline run.
///
/// The client, UI sink, and instance descriptor are provided up front by the
/// orchestrator; the resolved address and the halting error are the slots
/// written by steps as the run progresses.
#[derive(Debug)]
pub struct BuildContext<C, U> {
    client: C,
    ui: U,
    instance: InstanceDescriptor,
    resolved_address: Option<IpAddr>,
    error: Option<EipError>,
}

impl<C, U: Ui> BuildContext<C, U> {
    /// Assembles a context from the collaborators every step requires.
    #[must_use]
    pub const fn new(client: C, ui: U, instance: InstanceDescriptor) -> Self {
        Self {
            client,
            ui,
            instance,
            resolved_address: None,
            error: None,
        }
    }

    /// Returns the provider client.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Returns the UI sink.
    #[must_use]
    pub const fn ui(&self) -> &U {
        &self.ui
    }

    /// Returns the instance being provisioned.
    #[must_use]
    pub const fn instance(&self) -> &InstanceDescriptor {
        &self.instance
    }

    /// Returns the reachable address resolved by the addressing step.
    #[must_use]
    pub const fn resolved_address(&self) -> Option<IpAddr> {
        self.resolved_address
    }

    /// Records the reachable address for consumption by later steps.
    pub fn record_address(&mut self, address: IpAddr) {
        self.resolved_address = Some(address);
    }

    /// Returns the error recorded by a halted step, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&EipError> {
        self.error.as_ref()
    }

    /// Reports `error` through the UI sink, records it in the context, and
    /// returns the halting outcome for the orchestrator.
    pub fn halt(&mut self, error: EipError) -> StepOutcome {
        self.ui.say(&error.to_string());
        self.error = Some(error.clone());
        StepOutcome::Halt(error)
    }
}

/// One unit of a provisioning pipeline: a forward action and a compensating
/// teardown action.
///
/// Both methods return boxed futures so heterogeneous steps can sit behind
/// `Box<dyn Step<_, _>>` in the orchestrator's sequence. Dropping a returned
/// future abandons the step; no separate cancellation signal is threaded
/// through.
pub trait Step<C, U> {
    /// Executes the step's forward action.
    fn run<'a>(&'a mut self, context: &'a mut BuildContext<C, U>) -> StepFuture<'a, StepOutcome>;

    /// Undoes the step's side effects during teardown.
    ///
    /// Invoked whether or not [`run`](Step::run) succeeded. Failures must be
    /// reported through the UI sink rather than propagated: one step's
    /// teardown must not starve the remaining steps of theirs.
    fn cleanup<'a>(&'a mut self, context: &'a mut BuildContext<C, U>) -> StepFuture<'a, ()>;
}
