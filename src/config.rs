//! Step configuration: addressing mode, region, and allocation settings.

use serde::Deserialize;
use thiserror::Error;

use crate::client::{AllocationRequest, ChargeType};

/// Outbound bandwidth applied when a template omits the limit.
pub const DEFAULT_BANDWIDTH_MBPS: u32 = 5;

/// Configuration for the EIP configuration step.
///
/// Typically deserialised from a fragment of a build template; tests and
/// embedders construct it through [`EipConfigBuilder`]. Only `region` is
/// required. When `use_private_address` is set the allocation settings
/// (`charge_type`, `bandwidth_mbps`) are accepted but never consulted, so a
/// template can flip between modes without being rewritten.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct EipConfig {
    /// Reuse the instance's first private address instead of allocating a
    /// public one.
    pub use_private_address: bool,
    /// Region in which public addresses are allocated.
    pub region: String,
    /// Billing model for allocated addresses.
    pub charge_type: ChargeType,
    /// Maximum outbound bandwidth in megabits per second.
    pub bandwidth_mbps: u32,
}

impl Default for EipConfig {
    fn default() -> Self {
        Self {
            use_private_address: false,
            region: String::new(),
            charge_type: ChargeType::default(),
            bandwidth_mbps: DEFAULT_BANDWIDTH_MBPS,
        }
    }
}

impl EipConfig {
    /// Starts a builder with the default allocation settings.
    #[must_use]
    pub fn builder() -> EipConfigBuilder {
        EipConfigBuilder::new()
    }

    /// Checks the configuration for values no provider would accept.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRegion`] when `region` is blank and
    /// [`ConfigError::ZeroBandwidth`] when `bandwidth_mbps` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region.trim().is_empty() {
            return Err(ConfigError::MissingRegion);
        }
        if self.bandwidth_mbps == 0 {
            return Err(ConfigError::ZeroBandwidth);
        }
        Ok(())
    }

    /// Builds the allocation request sent to the provider client.
    #[must_use]
    pub fn allocation_request(&self) -> AllocationRequest {
        AllocationRequest {
            region: self.region.clone(),
            charge_type: self.charge_type,
            bandwidth_mbps: self.bandwidth_mbps,
        }
    }
}

/// Errors raised when an [`EipConfig`] fails validation.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Raised when the region is missing or blank.
    #[error("missing region: set `region` to the identifier addresses are allocated in")]
    MissingRegion,
    /// Raised when the bandwidth limit is zero.
    #[error("`bandwidth_mbps` must be at least 1")]
    ZeroBandwidth,
}

/// Builder for [`EipConfig`] that trims and validates on construction.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EipConfigBuilder {
    use_private_address: bool,
    region: String,
    charge_type: ChargeType,
    bandwidth_mbps: Option<u32>,
}

impl EipConfigBuilder {
    /// Creates a builder with the default allocation settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefers the instance's private address over allocating a public one.
    #[must_use]
    pub const fn use_private_address(mut self, value: bool) -> Self {
        self.use_private_address = value;
        self
    }

    /// Sets the allocation region.
    #[must_use]
    pub fn region(mut self, value: impl Into<String>) -> Self {
        self.region = value.into();
        self
    }

    /// Sets the billing model for allocated addresses.
    #[must_use]
    pub const fn charge_type(mut self, value: ChargeType) -> Self {
        self.charge_type = value;
        self
    }

    /// Sets the maximum outbound bandwidth in megabits per second.
    #[must_use]
    pub const fn bandwidth_mbps(mut self, value: u32) -> Self {
        self.bandwidth_mbps = Some(value);
        self
    }

    /// Builds the configuration, trimming the region and validating the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails.
    pub fn build(self) -> Result<EipConfig, ConfigError> {
        let config = EipConfig {
            use_private_address: self.use_private_address,
            region: self.region.trim().to_owned(),
            charge_type: self.charge_type,
            bandwidth_mbps: self.bandwidth_mbps.unwrap_or(DEFAULT_BANDWIDTH_MBPS),
        };
        config.validate()?;
        Ok(config)
    }
}
