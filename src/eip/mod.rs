//! Pipeline step that gives a freshly created instance a reachable address.
//!
//! In public mode the step allocates an elastic IP, waits for it to become
//! available, binds it to the instance, and waits for the binding to take
//! effect. In private mode it reuses the instance's first private address
//! and never touches the provider. Teardown releases whatever the forward
//! pass allocated, best effort, one warning per failed call.

mod error;

use std::time::Duration;

use crate::client::{AddressClient, AllocationId, EipStatus};
use crate::config::{ConfigError, EipConfig};
use crate::pipeline::{BuildContext, Step, StepFuture, StepOutcome};
use crate::ui::Ui;

pub use error::EipError;

/// Wait budget for one address status transition.
const WAIT_TIMEOUT: Duration = Duration::from_secs(180);

/// Pipeline step that resolves one reachable IP address for the instance in
/// the build context.
///
/// The step remembers the allocation it made so that
/// [`cleanup`](Step::cleanup) releases exactly what [`run`](Step::run)
/// acquired and nothing else.
#[derive(Debug)]
pub struct EipStep {
    config: EipConfig,
    wait_timeout: Duration,
    allocated: Option<AllocationId>,
}

impl EipStep {
    /// Creates the step from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration fails validation.
    pub fn new(config: EipConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            wait_timeout: WAIT_TIMEOUT,
            allocated: None,
        })
    }

    /// Overrides the status wait budget.
    ///
    /// This is primarily used by tests to keep timeout scenarios fast.
    #[must_use]
    pub const fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    /// Returns the allocation remembered for teardown, if the forward pass
    /// made one.
    #[must_use]
    pub const fn allocated_id(&self) -> Option<&AllocationId> {
        self.allocated.as_ref()
    }

    async fn allocate_and_bind<C, U>(&mut self, context: &mut BuildContext<C, U>) -> StepOutcome
    where
        C: AddressClient,
        U: Ui,
    {
        context.ui().say("Allocating EIP");
        let instance_id = context.instance().instance_id.clone();
        let request = self.config.allocation_request();

        let allocated = context.client().allocate_address(&request).await;
        let allocation = match allocated {
            Ok(allocation) => allocation,
            Err(err) => {
                return context.halt(EipError::Allocation {
                    region: self.config.region.clone(),
                    message: err.to_string(),
                });
            }
        };
        // Recorded before the availability wait: cleanup must release the
        // address even when a later call fails.
        self.allocated = Some(allocation.allocation_id.clone());

        let available = context
            .client()
            .wait_for_address_status(
                &self.config.region,
                &allocation.allocation_id,
                EipStatus::Available,
                self.wait_timeout,
            )
            .await;
        if let Err(err) = available {
            return context.halt(EipError::StatusWait {
                allocation_id: allocation.allocation_id.as_str().to_owned(),
                status: EipStatus::Available,
                message: err.to_string(),
            });
        }

        let associated = context
            .client()
            .associate_address(&allocation.allocation_id, &instance_id)
            .await;
        if let Err(err) = associated {
            return context.halt(EipError::Association {
                allocation_id: allocation.allocation_id.as_str().to_owned(),
                instance_id,
                message: err.to_string(),
            });
        }

        let in_use = context
            .client()
            .wait_for_address_status(
                &self.config.region,
                &allocation.allocation_id,
                EipStatus::InUse,
                self.wait_timeout,
            )
            .await;
        if let Err(err) = in_use {
            return context.halt(EipError::StatusWait {
                allocation_id: allocation.allocation_id.as_str().to_owned(),
                status: EipStatus::InUse,
                message: err.to_string(),
            });
        }

        context
            .ui()
            .say(&format!("Allocated EIP {}", allocation.address));
        context.record_address(allocation.address);
        StepOutcome::Continue
    }
}

/// Resolves the instance's first private address into the context.
///
/// The allocation settings are not consulted on this path: a template that
/// flips to private addressing keeps its public-mode fields without them
/// taking effect.
fn resolve_private_address<C, U: Ui>(context: &mut BuildContext<C, U>) -> StepOutcome {
    let Some(address) = context.instance().first_private_address() else {
        context
            .ui()
            .say("Failed to get a private address for the instance");
        return StepOutcome::Halt(EipError::MissingPrivateAddress {
            instance_id: context.instance().instance_id.clone(),
        });
    };
    context.record_address(address);
    StepOutcome::Continue
}

impl<C, U> Step<C, U> for EipStep
where
    C: AddressClient + Send + Sync,
    U: Ui + Send + Sync,
{
    fn run<'a>(&'a mut self, context: &'a mut BuildContext<C, U>) -> StepFuture<'a, StepOutcome> {
        Box::pin(async move {
            if self.config.use_private_address {
                resolve_private_address(context)
            } else {
                self.allocate_and_bind(context).await
            }
        })
    }

    fn cleanup<'a>(&'a mut self, context: &'a mut BuildContext<C, U>) -> StepFuture<'a, ()> {
        Box::pin(async move {
            let Some(allocation_id) = self.allocated.as_ref() else {
                return;
            };

            let notice = if context.error().is_some() {
                "Deleting EIP because of an earlier error..."
            } else {
                "Cleaning up 'EIP'"
            };
            context.ui().say(notice);

            let unassociated = context
                .client()
                .unassociate_address(allocation_id, &context.instance().instance_id)
                .await;
            if let Err(err) = unassociated {
                context
                    .ui()
                    .say(&format!("Failed to unassociate EIP {allocation_id}: {err}"));
            }

            let available = context
                .client()
                .wait_for_address_status(
                    &self.config.region,
                    allocation_id,
                    EipStatus::Available,
                    self.wait_timeout,
                )
                .await;
            if let Err(err) = available {
                context
                    .ui()
                    .say(&format!("EIP {allocation_id} did not return to Available: {err}"));
            }

            let released = context.client().release_address(allocation_id).await;
            if let Err(err) = released {
                context
                    .ui()
                    .say(&format!("Failed to release EIP {allocation_id}: {err}"));
            }
        })
    }
}
