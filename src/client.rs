//! Provider contract for allocating and binding elastic IP addresses.

use std::fmt;
use std::future::Future;
use std::net::IpAddr;
use std::pin::Pin;
use std::time::Duration;

use serde::Deserialize;

/// Future returned by client operations.
pub type ClientFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Provider-assigned handle for a reserved address.
///
/// The identifier names the reservation, not the address value: the provider
/// bills and releases the reservation through this handle.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct AllocationId(String);

impl AllocationId {
    /// Wraps a provider-assigned identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for AllocationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AllocationId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl AsRef<str> for AllocationId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AllocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle states reported by the provider for an elastic IP.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EipStatus {
    /// Reserved but not bound to any instance.
    Available,
    /// Bound to an instance.
    InUse,
    /// Transitioning towards `InUse` after an associate call.
    Associating,
    /// Transitioning towards `Available` after an unassociate call.
    Unassociating,
}

impl EipStatus {
    /// Returns the status string used by the provider API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::InUse => "InUse",
            Self::Associating => "Associating",
            Self::Unassociating => "Unassociating",
        }
    }
}

impl fmt::Display for EipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing model applied to an allocated address.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
pub enum ChargeType {
    /// Bill a fixed rate for the reserved bandwidth.
    PayByBandwidth,
    /// Bill for the traffic actually transferred.
    #[default]
    PayByTraffic,
}

impl ChargeType {
    /// Returns the charge-type string used by the provider API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PayByBandwidth => "PayByBandwidth",
            Self::PayByTraffic => "PayByTraffic",
        }
    }
}

impl fmt::Display for ChargeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters required to allocate a new address.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllocationRequest {
    /// Region in which the address is reserved.
    pub region: String,
    /// Billing model for the reservation.
    pub charge_type: ChargeType,
    /// Maximum outbound bandwidth in megabits per second.
    pub bandwidth_mbps: u32,
}

/// Address and identifier returned by a successful allocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EipAllocation {
    /// Publicly reachable address reserved by the provider.
    pub address: IpAddr,
    /// Handle used for later association, waits, and release.
    pub allocation_id: AllocationId,
}

/// Minimal provider interface for elastic IP management.
///
/// Implementations own transport, authentication, and the polling strategy
/// behind [`wait_for_address_status`](AddressClient::wait_for_address_status);
/// callers only sequence the operations.
pub trait AddressClient {
    /// Provider specific error type returned by the client.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Reserves a new address and returns it with its allocation identifier.
    fn allocate_address<'a>(
        &'a self,
        request: &'a AllocationRequest,
    ) -> ClientFuture<'a, EipAllocation, Self::Error>;

    /// Binds a reserved address to the given instance.
    fn associate_address<'a>(
        &'a self,
        allocation_id: &'a AllocationId,
        instance_id: &'a str,
    ) -> ClientFuture<'a, (), Self::Error>;

    /// Unbinds a reserved address from the given instance.
    fn unassociate_address<'a>(
        &'a self,
        allocation_id: &'a AllocationId,
        instance_id: &'a str,
    ) -> ClientFuture<'a, (), Self::Error>;

    /// Returns a reserved address to the provider's pool.
    fn release_address<'a>(
        &'a self,
        allocation_id: &'a AllocationId,
    ) -> ClientFuture<'a, (), Self::Error>;

    /// Blocks until the address reports `target` status, up to `timeout`.
    fn wait_for_address_status<'a>(
        &'a self,
        region: &'a str,
        allocation_id: &'a AllocationId,
        target: EipStatus,
        timeout: Duration,
    ) -> ClientFuture<'a, (), Self::Error>;
}
