//! BDD scenarios for the EIP configuration step.

use rstest_bdd_macros::scenario;

use super::test_helpers::{EipContext, eip_context};

#[scenario(
    path = "tests/features/eip.feature",
    name = "Allocate and bind a public address"
)]
fn scenario_allocate_and_bind(eip_context: EipContext) {
    let _ = eip_context;
}

#[scenario(
    path = "tests/features/eip.feature",
    name = "Reuse the instance's private address"
)]
fn scenario_reuse_private_address(eip_context: EipContext) {
    let _ = eip_context;
}

#[scenario(
    path = "tests/features/eip.feature",
    name = "Halt when no private address exists"
)]
fn scenario_missing_private_address(eip_context: EipContext) {
    let _ = eip_context;
}

#[scenario(
    path = "tests/features/eip.feature",
    name = "Halt when allocation is rejected"
)]
fn scenario_allocation_rejected(eip_context: EipContext) {
    let _ = eip_context;
}

#[scenario(
    path = "tests/features/eip.feature",
    name = "Release a half-configured address"
)]
fn scenario_release_half_configured(eip_context: EipContext) {
    let _ = eip_context;
}

#[scenario(
    path = "tests/features/eip.feature",
    name = "Halt when binding is rejected"
)]
fn scenario_binding_rejected(eip_context: EipContext) {
    let _ = eip_context;
}

#[scenario(path = "tests/features/eip.feature", name = "Tear down a bound address")]
fn scenario_tear_down_bound_address(eip_context: EipContext) {
    let _ = eip_context;
}

#[scenario(
    path = "tests/features/eip.feature",
    name = "Teardown warns but keeps going when the provider fails"
)]
fn scenario_teardown_keeps_going(eip_context: EipContext) {
    let _ = eip_context;
}
