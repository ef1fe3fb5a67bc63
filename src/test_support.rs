//! Test support utilities shared across unit and integration tests.

use std::collections::VecDeque;
use std::net::IpAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use thiserror::Error;

use crate::client::{
    AddressClient, AllocationId, AllocationRequest, ChargeType, ClientFuture, EipAllocation,
    EipStatus,
};
use crate::ui::Ui;

/// UI sink that records every message for later assertions.
#[derive(Clone, Debug, Default)]
pub struct RecordingUi {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingUi {
    /// Creates a recorder with no messages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the messages said so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Ui for RecordingUi {
    fn say(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
    }
}

/// Error returned by [`ScriptedAddressClient`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ScriptedClientError {
    /// Failure scripted by a test.
    #[error("{message}")]
    Scripted {
        /// Message the test chose for the failure.
        message: String,
    },
    /// Raised when an operation runs without a scripted result.
    #[error("no scripted result for {operation}")]
    Exhausted {
        /// Operation that ran dry.
        operation: String,
    },
}

/// One invocation recorded by [`ScriptedAddressClient`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClientCall {
    /// An allocation attempt with the requested settings.
    Allocate {
        /// Requested region.
        region: String,
        /// Requested billing model.
        charge_type: ChargeType,
        /// Requested bandwidth limit.
        bandwidth_mbps: u32,
    },
    /// An association attempt.
    Associate {
        /// Allocation identifier passed by the caller.
        allocation_id: String,
        /// Instance identifier passed by the caller.
        instance_id: String,
    },
    /// An unassociation attempt.
    Unassociate {
        /// Allocation identifier passed by the caller.
        allocation_id: String,
        /// Instance identifier passed by the caller.
        instance_id: String,
    },
    /// A release attempt.
    Release {
        /// Allocation identifier passed by the caller.
        allocation_id: String,
    },
    /// A status wait with its target and budget.
    WaitForStatus {
        /// Region passed by the caller.
        region: String,
        /// Allocation identifier passed by the caller.
        allocation_id: String,
        /// Status the caller waited for.
        target: EipStatus,
        /// Wait budget passed by the caller.
        timeout: Duration,
    },
}

#[derive(Debug, Default)]
struct ClientState {
    allocate_results: VecDeque<Result<EipAllocation, ScriptedClientError>>,
    associate_results: VecDeque<Result<(), ScriptedClientError>>,
    unassociate_results: VecDeque<Result<(), ScriptedClientError>>,
    release_results: VecDeque<Result<(), ScriptedClientError>>,
    wait_results: VecDeque<Result<(), ScriptedClientError>>,
    calls: Vec<ClientCall>,
}

/// Scripted provider client that returns pre-seeded results in FIFO order.
///
/// Used to drive deterministic step outcomes without any provider traffic;
/// every invocation is recorded for assertions. Unseeded operations fail
/// with [`ScriptedClientError::Exhausted`] so a test cannot silently pass
/// on calls it never scripted.
#[derive(Clone, Debug, Default)]
pub struct ScriptedAddressClient {
    state: Arc<Mutex<ClientState>>,
}

impl ScriptedAddressClient {
    /// Creates a client with no queued results.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all invocations recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<ClientCall> {
        self.lock().calls.clone()
    }

    /// Queues a successful allocation of `address` under `allocation_id`.
    pub fn push_allocation(&self, address: IpAddr, allocation_id: &str) {
        self.lock().allocate_results.push_back(Ok(EipAllocation {
            address,
            allocation_id: AllocationId::from(allocation_id),
        }));
    }

    /// Queues a failed allocation.
    pub fn push_allocation_failure(&self, message: &str) {
        self.lock()
            .allocate_results
            .push_back(Err(scripted(message)));
    }

    /// Queues a successful association.
    pub fn push_associate_success(&self) {
        self.lock().associate_results.push_back(Ok(()));
    }

    /// Queues a failed association.
    pub fn push_associate_failure(&self, message: &str) {
        self.lock()
            .associate_results
            .push_back(Err(scripted(message)));
    }

    /// Queues a successful unassociation.
    pub fn push_unassociate_success(&self) {
        self.lock().unassociate_results.push_back(Ok(()));
    }

    /// Queues a failed unassociation.
    pub fn push_unassociate_failure(&self, message: &str) {
        self.lock()
            .unassociate_results
            .push_back(Err(scripted(message)));
    }

    /// Queues a successful release.
    pub fn push_release_success(&self) {
        self.lock().release_results.push_back(Ok(()));
    }

    /// Queues a failed release.
    pub fn push_release_failure(&self, message: &str) {
        self.lock().release_results.push_back(Err(scripted(message)));
    }

    /// Queues a successful status wait.
    pub fn push_wait_success(&self) {
        self.lock().wait_results.push_back(Ok(()));
    }

    /// Queues a failed status wait.
    pub fn push_wait_failure(&self, message: &str) {
        self.lock().wait_results.push_back(Err(scripted(message)));
    }

    fn lock(&self) -> MutexGuard<'_, ClientState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn scripted(message: &str) -> ScriptedClientError {
    ScriptedClientError::Scripted {
        message: message.to_owned(),
    }
}

fn exhausted(operation: &str) -> ScriptedClientError {
    ScriptedClientError::Exhausted {
        operation: operation.to_owned(),
    }
}

impl AddressClient for ScriptedAddressClient {
    type Error = ScriptedClientError;

    fn allocate_address<'a>(
        &'a self,
        request: &'a AllocationRequest,
    ) -> ClientFuture<'a, EipAllocation, Self::Error> {
        Box::pin(async move {
            let mut state = self.lock();
            state.calls.push(ClientCall::Allocate {
                region: request.region.clone(),
                charge_type: request.charge_type,
                bandwidth_mbps: request.bandwidth_mbps,
            });
            state
                .allocate_results
                .pop_front()
                .unwrap_or_else(|| Err(exhausted("allocate_address")))
        })
    }

    fn associate_address<'a>(
        &'a self,
        allocation_id: &'a AllocationId,
        instance_id: &'a str,
    ) -> ClientFuture<'a, (), Self::Error> {
        Box::pin(async move {
            let mut state = self.lock();
            state.calls.push(ClientCall::Associate {
                allocation_id: allocation_id.as_str().to_owned(),
                instance_id: instance_id.to_owned(),
            });
            state
                .associate_results
                .pop_front()
                .unwrap_or_else(|| Err(exhausted("associate_address")))
        })
    }

    fn unassociate_address<'a>(
        &'a self,
        allocation_id: &'a AllocationId,
        instance_id: &'a str,
    ) -> ClientFuture<'a, (), Self::Error> {
        Box::pin(async move {
            let mut state = self.lock();
            state.calls.push(ClientCall::Unassociate {
                allocation_id: allocation_id.as_str().to_owned(),
                instance_id: instance_id.to_owned(),
            });
            state
                .unassociate_results
                .pop_front()
                .unwrap_or_else(|| Err(exhausted("unassociate_address")))
        })
    }

    fn release_address<'a>(
        &'a self,
        allocation_id: &'a AllocationId,
    ) -> ClientFuture<'a, (), Self::Error> {
        Box::pin(async move {
            let mut state = self.lock();
            state.calls.push(ClientCall::Release {
                allocation_id: allocation_id.as_str().to_owned(),
            });
            state
                .release_results
                .pop_front()
                .unwrap_or_else(|| Err(exhausted("release_address")))
        })
    }

    fn wait_for_address_status<'a>(
        &'a self,
        region: &'a str,
        allocation_id: &'a AllocationId,
        target: EipStatus,
        timeout: Duration,
    ) -> ClientFuture<'a, (), Self::Error> {
        Box::pin(async move {
            let mut state = self.lock();
            state.calls.push(ClientCall::WaitForStatus {
                region: region.to_owned(),
                allocation_id: allocation_id.as_str().to_owned(),
                target,
                timeout,
            });
            state
                .wait_results
                .pop_front()
                .unwrap_or_else(|| Err(exhausted("wait_for_address_status")))
        })
    }
}
