//! Errors raised by the EIP configuration step.

use thiserror::Error;

use crate::client::EipStatus;

/// Forward-path failures of the EIP configuration step.
///
/// Every variant halts the pipeline. Teardown failures never appear here:
/// they are reported through the UI sink and then swallowed.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum EipError {
    /// Raised when private addressing is requested but the instance reports
    /// no private address.
    #[error("instance {instance_id} has no private address")]
    MissingPrivateAddress {
        /// Provider identifier for the instance.
        instance_id: String,
    },
    /// Raised when the provider rejects the allocation request.
    #[error("failed to allocate EIP in {region}: {message}")]
    Allocation {
        /// Region the allocation was attempted in.
        region: String,
        /// Failure reported by the provider client.
        message: String,
    },
    /// Raised when an allocated address does not reach the expected status
    /// within the wait budget.
    #[error("EIP {allocation_id} did not reach {status} status: {message}")]
    StatusWait {
        /// Allocation being watched.
        allocation_id: String,
        /// Status the address was expected to reach.
        status: EipStatus,
        /// Failure reported by the provider client.
        message: String,
    },
    /// Raised when the provider rejects binding the address to the instance.
    #[error("failed to bind EIP {allocation_id} to instance {instance_id}: {message}")]
    Association {
        /// Allocation being bound.
        allocation_id: String,
        /// Provider identifier for the instance.
        instance_id: String,
        /// Failure reported by the provider client.
        message: String,
    },
}
