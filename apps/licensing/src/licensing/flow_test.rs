//! Tests for the existing-license and NLM submit flows.

use super::choice::{LicensingChoice, LicensingKind};
use super::existing_license::ExistingLicenseForm;
use super::field::FieldFeedback;
use super::flow::{FlowState, LicensingFlow};
use super::nlm::NlmForm;
use super::version::MatlabVersion;
use crate::dispatch::RecordingDispatcher;
use crate::error::LicensingError;
use crate::status::StatusSnapshot;

fn status_with_version(version: Option<&str>) -> StatusSnapshot {
    let mut status = StatusSnapshot::default();
    status.matlab.version_on_path = version.map(str::to_string);
    status
}

fn version(v: &str) -> MatlabVersion {
    MatlabVersion::parse(v).unwrap()
}

// ============================================================================
// Existing license
// ============================================================================

#[test]
fn test_existing_license_with_known_version_dispatches_once() {
    let dispatcher = RecordingDispatcher::new();
    let mut form = ExistingLicenseForm::new();

    let state = form.submit(&status_with_version(Some("R2024a")), &dispatcher);

    assert_eq!(state, FlowState::Submitted);
    assert_eq!(
        dispatcher.payloads(),
        vec![LicensingChoice::existing_license().with_matlab_version(version("R2024a"))]
    );
}

#[test]
fn test_existing_license_double_submit_without_version_asks_once() {
    let dispatcher = RecordingDispatcher::new();
    let mut form = ExistingLicenseForm::new();
    let status = status_with_version(None);

    assert_eq!(form.submit(&status, &dispatcher), FlowState::AwaitingVersion);
    assert_eq!(form.submit(&status, &dispatcher), FlowState::AwaitingVersion);

    assert_eq!(dispatcher.count(), 0);
    assert_eq!(form.flow().pending(), Some(&LicensingChoice::existing_license()));
}

#[test]
fn test_existing_license_empty_version_on_path_is_unknown() {
    let dispatcher = RecordingDispatcher::new();
    let mut form = ExistingLicenseForm::new();

    assert_eq!(
        form.submit(&status_with_version(Some("")), &dispatcher),
        FlowState::AwaitingVersion
    );
    assert_eq!(dispatcher.count(), 0);
}

#[test]
fn test_existing_license_completes_after_version_prompt() {
    let dispatcher = RecordingDispatcher::new();
    let mut form = ExistingLicenseForm::new();
    form.submit(&status_with_version(None), &dispatcher);

    form.enter_version("R2023b");
    assert_eq!(form.submit_version(&dispatcher), Ok(FlowState::Submitted));

    assert_eq!(
        dispatcher.last(),
        Some(LicensingChoice::existing_license().with_matlab_version(version("R2023b")))
    );
    assert_eq!(form.flow().pending(), None);
}

// ============================================================================
// NLM
// ============================================================================

#[test]
fn test_nlm_feedback_tracks_typing() {
    let mut form = NlmForm::new();
    assert_eq!(form.feedback(), FieldFeedback::Pristine);
    assert!(!form.can_submit());

    form.set_connection_string("27000");
    assert_eq!(form.feedback(), FieldFeedback::Invalid);

    form.set_connection_string("27000@licserver");
    assert_eq!(form.feedback(), FieldFeedback::Valid);
    assert!(form.can_submit());
}

#[test]
fn test_nlm_invalid_submit_is_refused() {
    let dispatcher = RecordingDispatcher::new();
    let mut form = NlmForm::new();
    form.set_connection_string("27000@host:");

    let err = form.submit(&status_with_version(Some("R2024a")), &dispatcher).unwrap_err();

    assert_eq!(
        err,
        LicensingError::InvalidConnectionString {
            value: "27000@host:".to_string()
        }
    );
    assert_eq!(form.state(), FlowState::Idle);
    assert_eq!(dispatcher.count(), 0);
}

#[test]
fn test_nlm_submit_with_known_version() {
    let dispatcher = RecordingDispatcher::new();
    let mut form = NlmForm::new();
    form.set_connection_string("123@hostname");

    let state = form.submit(&status_with_version(Some("R2024a")), &dispatcher).unwrap();

    assert_eq!(state, FlowState::Submitted);
    let json = serde_json::to_value(dispatcher.last().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"type": "nlm", "connectionString": "123@hostname", "matlabVersion": "R2024a"})
    );
}

#[test]
fn test_nlm_submit_without_version_goes_through_prompt() {
    let dispatcher = RecordingDispatcher::new();
    let mut form = NlmForm::new();
    form.set_connection_string("1@a:2@b");

    assert_eq!(
        form.submit(&status_with_version(None), &dispatcher),
        Ok(FlowState::AwaitingVersion)
    );

    form.enter_version("2024a");
    assert!(matches!(
        form.submit_version(&dispatcher),
        Err(LicensingError::InvalidMatlabVersion { .. })
    ));
    assert_eq!(form.state(), FlowState::AwaitingVersion);
    assert_eq!(dispatcher.count(), 0);

    form.enter_version("R2024a");
    assert_eq!(form.submit_version(&dispatcher), Ok(FlowState::Submitted));
    let payload = dispatcher.last().unwrap();
    assert_eq!(payload.kind(), LicensingKind::Nlm);
    assert_eq!(payload, LicensingChoice::nlm("1@a:2@b").with_matlab_version(version("R2024a")));
}

// ============================================================================
// Shared flow
// ============================================================================

#[test]
fn test_submit_version_outside_prompt_is_rejected() {
    let dispatcher = RecordingDispatcher::new();
    let mut flow = LicensingFlow::new();
    flow.enter_version("R2024a");

    assert_eq!(flow.submit_version(&dispatcher), Err(LicensingError::NotAwaitingVersion));
    assert_eq!(flow.state(), FlowState::Idle);
    assert_eq!(dispatcher.count(), 0);
}

#[test]
fn test_version_prompt_starts_pristine() {
    let dispatcher = RecordingDispatcher::new();
    let mut flow = LicensingFlow::new();
    flow.submit(LicensingChoice::existing_license(), None, &dispatcher);

    assert_eq!(flow.version_feedback(), FieldFeedback::Pristine);
    flow.enter_version("R2024x");
    assert_eq!(flow.version_feedback(), FieldFeedback::Invalid);
    assert!(!flow.version_input().can_submit());
}

#[test]
fn test_resubmit_after_submitted_dispatches_again() {
    let dispatcher = RecordingDispatcher::new();
    let mut flow = LicensingFlow::new();

    flow.submit(LicensingChoice::existing_license(), Some(version("R2024a")), &dispatcher);
    flow.submit(LicensingChoice::existing_license(), Some(version("R2024a")), &dispatcher);

    assert_eq!(flow.state(), FlowState::Submitted);
    assert_eq!(dispatcher.count(), 2);
}
