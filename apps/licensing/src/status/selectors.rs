//! Pure projections of the status snapshot into UI flags.
//!
//! Each projection has a snapshot-level function and, where the memoized
//! variant needs it, an input-level function that takes only the fields the rule
//! depends on.

use std::time::Duration;

use super::snapshot::{ErrorInfo, MatlabStatus, StatusSnapshot, TriggerPosition};
use crate::licensing::{LicensingKind, MatlabVersion};

/// How often to poll the server status.
pub const STATUS_PERIOD: Duration = Duration::from_millis(1000);

/// Consecutive failed status fetches before showing a connection error.
pub const MAX_REQUEST_FAIL_COUNT: u32 = 60;

// ============================================================================
// Plain field access
// ============================================================================

pub fn matlab_status(status: &StatusSnapshot) -> &MatlabStatus {
    &status.matlab.status
}

/// Release found on the PATH, or `None` when unknown (missing or empty).
pub fn matlab_version_on_path(status: &StatusSnapshot) -> Option<&str> {
    status.matlab.version_on_path.as_deref().filter(|v| !v.is_empty())
}

pub fn resolved_matlab_version(status: &StatusSnapshot) -> Option<MatlabVersion> {
    matlab_version_on_path(status).and_then(MatlabVersion::from_version_on_path)
}

pub fn supported_matlab_versions(status: &StatusSnapshot) -> &[String] {
    &status.matlab.supported_versions
}

pub fn ws_env(status: &StatusSnapshot) -> &str {
    &status.server_status.ws_env
}

pub fn error(status: &StatusSnapshot) -> Option<&ErrorInfo> {
    status.error.as_ref()
}

pub fn warnings(status: &StatusSnapshot) -> &[String] {
    &status.warnings
}

pub fn load_url(status: &StatusSnapshot) -> Option<&str> {
    status.load_url.as_deref()
}

pub fn tutorial_hidden(status: &StatusSnapshot) -> bool {
    status.tutorial_hidden
}

pub fn use_mos(status: &StatusSnapshot) -> bool {
    status.use_mos
}

pub fn use_mre(status: &StatusSnapshot) -> bool {
    status.use_mre
}

pub fn auth_enabled(status: &StatusSnapshot) -> bool {
    status.authentication.enabled
}

pub fn auth_token(status: &StatusSnapshot) -> Option<&str> {
    status.authentication.token.as_deref()
}

pub fn is_authenticated(status: &StatusSnapshot) -> bool {
    status.authentication.status
}

pub fn is_active_client(status: &StatusSnapshot) -> bool {
    status.session_status.is_active_client
}

pub fn is_concurrency_enabled(status: &StatusSnapshot) -> bool {
    status.session_status.is_concurrency_enabled
}

pub fn was_ever_active(status: &StatusSnapshot) -> bool {
    status.session_status.was_ever_active
}

pub fn client_id(status: &StatusSnapshot) -> Option<&str> {
    status.session_status.client_id.as_deref()
}

pub fn has_fetched_server_status(status: &StatusSnapshot) -> bool {
    status.server_status.has_fetched
}

pub fn server_status_fetch_fail_count(status: &StatusSnapshot) -> u32 {
    status.server_status.fetch_fail_count
}

pub fn trigger_position(status: &StatusSnapshot) -> Option<TriggerPosition> {
    status.trigger_position
}

// ============================================================================
// Derived flags
// ============================================================================

pub fn has_fetched_env_config(status: &StatusSnapshot) -> bool {
    status.env_config.is_some()
}

pub fn is_error(status: &StatusSnapshot) -> bool {
    status.error.is_some()
}

/// A client that isn't the active one is a concurrent session.
pub fn is_concurrent(status: &StatusSnapshot) -> bool {
    !status.session_status.is_active_client
}

pub fn is_connection_error(status: &StatusSnapshot) -> bool {
    connection_error(
        status.server_status.fetch_fail_count,
        is_concurrency_enabled(status),
        is_concurrent(status),
    )
}

/// A concurrent session flags the first failure; otherwise wait for
/// `MAX_REQUEST_FAIL_COUNT` in a row.
pub fn connection_error(fail_count: u32, concurrency_enabled: bool, concurrent: bool) -> bool {
    if concurrency_enabled && concurrent {
        return fail_count >= 1;
    }
    fail_count >= MAX_REQUEST_FAIL_COUNT
}

pub fn matlab_up(status: &StatusSnapshot) -> bool {
    status.matlab.status == MatlabStatus::Up
}

pub fn matlab_starting(status: &StatusSnapshot) -> bool {
    status.matlab.status == MatlabStatus::Starting
}

pub fn matlab_stopping(status: &StatusSnapshot) -> bool {
    status.matlab.status == MatlabStatus::Stopping
}

pub fn matlab_down(status: &StatusSnapshot) -> bool {
    status.matlab.status == MatlabStatus::Down
}

/// Same as `matlab_starting` for now. Kept separate so intermediate failures can
/// count as pending later.
pub fn matlab_pending(status: &StatusSnapshot) -> bool {
    matlab_starting(status)
}

pub fn overlay_hidable(status: &StatusSnapshot) -> bool {
    overlay_hidable_from(
        &status.matlab.status,
        is_error(status),
        auth_enabled(status),
        is_authenticated(status),
    )
}

pub fn overlay_hidable_from(
    matlab_status: &MatlabStatus,
    is_error: bool,
    auth_enabled: bool,
    is_authenticated: bool,
) -> bool {
    *matlab_status == MatlabStatus::Up && !is_error && (!auth_enabled || is_authenticated)
}

/// Whether the overlay should show, given the user's own toggle.
pub fn overlay_visibility(status: &StatusSnapshot) -> bool {
    (auth_enabled(status) && !is_authenticated(status))
        || !matlab_up(status)
        || status.overlay_visibility
        || is_error(status)
}

pub fn overlay_visible(status: &StatusSnapshot) -> bool {
    overlay_visibility(status) || is_error(status)
}

/// Status poll interval, or `None` to pause polling.
pub fn fetch_status_period(status: &StatusSnapshot) -> Option<Duration> {
    status_period(
        status.server_status.is_submitting,
        status.server_status.is_fetching,
        is_concurrency_enabled(status),
        is_concurrent(status),
    )
}

/// Polling pauses while a request is in flight or while this session is a
/// concurrent one.
pub fn status_period(is_submitting: bool, is_fetching: bool, concurrency_enabled: bool, concurrent: bool) -> Option<Duration> {
    if is_submitting || is_fetching || (concurrency_enabled && concurrent) {
        return None;
    }
    Some(STATUS_PERIOD)
}

// ============================================================================
// Licensing
// ============================================================================

pub fn licensing_provided(status: &StatusSnapshot) -> bool {
    status.server_status.licensing_info.kind.is_some()
}

pub fn licensing_is_mhlm(status: &StatusSnapshot) -> bool {
    status.server_status.licensing_info.kind == Some(LicensingKind::Mhlm)
}

/// Email of the signed-in account, used to prefill the login form. Empty
/// unless licensed through MHLM.
pub fn licensing_mhlm_username(status: &StatusSnapshot) -> &str {
    if licensing_is_mhlm(status) {
        status.server_status.licensing_info.email_address.as_deref().unwrap_or("")
    } else {
        ""
    }
}

pub fn licensing_mhlm_has_entitlements(status: &StatusSnapshot) -> bool {
    licensing_is_mhlm(status) && !status.server_status.licensing_info.entitlements.is_empty()
}

/// An MHLM license with entitlements where one has been picked.
pub fn is_entitled(status: &StatusSnapshot) -> bool {
    licensing_mhlm_has_entitlements(status)
        && status
            .server_status
            .licensing_info
            .entitlement_id
            .as_deref()
            .is_some_and(|id| !id.is_empty())
}

// ============================================================================
// Errors
// ============================================================================

pub fn is_invalid_token_error(status: &StatusSnapshot) -> bool {
    invalid_token_error(auth_enabled(status), is_authenticated(status), error(status))
}

pub fn invalid_token_error(auth_enabled: bool, is_authenticated: bool, error: Option<&ErrorInfo>) -> bool {
    auth_enabled && !is_authenticated && error.is_some_and(ErrorInfo::is_invalid_token)
}
