//! Shared fixtures for EIP step BDD scenarios.

use std::net::IpAddr;

use maiak::test_support::{RecordingUi, ScriptedAddressClient};
use maiak::{EipError, StepOutcome};
use rstest::fixture;

/// Region every scenario allocates in.
pub const TEST_REGION: &str = "cn-hangzhou";
/// Instance the scenarios resolve addresses for.
pub const TEST_INSTANCE_ID: &str = "i-2ze0example";

/// Snapshot of one step execution taken by the when-steps.
#[derive(Clone, Debug)]
pub struct RunRecord {
    pub outcome: StepOutcome,
    pub resolved_address: Option<IpAddr>,
    pub context_error: Option<EipError>,
    pub allocated_id: Option<String>,
}

/// Scenario state threaded through the BDD steps.
#[derive(Clone, Debug)]
pub struct EipContext {
    pub client: ScriptedAddressClient,
    pub ui: RecordingUi,
    pub use_private_address: bool,
    pub private_addresses: Vec<IpAddr>,
    pub record: Option<RunRecord>,
}

#[fixture]
pub fn eip_context() -> EipContext {
    EipContext {
        client: ScriptedAddressClient::new(),
        ui: RecordingUi::new(),
        use_private_address: false,
        private_addresses: Vec::new(),
        record: None,
    }
}
