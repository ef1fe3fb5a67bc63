//! Core library for the Maiak addressing step.
//!
//! The crate implements one step of an image-build pipeline: giving a
//! freshly created compute instance an IP address that later steps
//! (typically SSH provisioning) can reach. Depending on configuration the
//! step either reuses the instance's private address or allocates an
//! elastic IP, binds it, and releases it again during teardown. The
//! pipeline orchestrator, the provider SDK, and the remaining build steps
//! are external collaborators; this crate defines the contracts they
//! satisfy.

pub mod client;
pub mod config;
pub mod eip;
pub mod pipeline;
pub mod test_support;
pub mod ui;

pub use client::{
    AddressClient, AllocationId, AllocationRequest, ChargeType, ClientFuture, EipAllocation,
    EipStatus,
};
pub use config::{ConfigError, DEFAULT_BANDWIDTH_MBPS, EipConfig, EipConfigBuilder};
pub use eip::{EipError, EipStep};
pub use pipeline::{BuildContext, InstanceDescriptor, Step, StepFuture, StepOutcome};
pub use ui::{Ui, WriterUi};
