//! Single-entry memoization for the status projections.
//!
//! A projection is recomputed only when its inputs differ from the previous
//! call. Results are identical with or without the cache.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::information::{InformationDetails, details_for};
use super::selectors;
use super::snapshot::{ErrorInfo, MatlabStatus, StatusSnapshot};
use crate::error::StatusError;
use crate::ignore_poison::IgnorePoison;

/// Caches the last output of a projection, keyed by its inputs.
#[derive(Debug)]
pub struct Memo<I, O> {
    last: Mutex<Option<(I, O)>>,
    computations: AtomicUsize,
}

impl<I, O> Default for Memo<I, O> {
    fn default() -> Self {
        Self {
            last: Mutex::new(None),
            computations: AtomicUsize::new(0),
        }
    }
}

impl<I: PartialEq, O: Clone> Memo<I, O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached output if `inputs` equal the last ones, else computes.
    pub fn get(&self, inputs: I, compute: impl FnOnce(&I) -> O) -> O {
        let mut last = self.last.lock_ignore_poison();
        if let Some((cached_inputs, output)) = last.as_ref()
            && *cached_inputs == inputs
        {
            return output.clone();
        }

        let output = compute(&inputs);
        self.computations.fetch_add(1, Ordering::Relaxed);
        *last = Some((inputs, output.clone()));
        output
    }

    /// How many times `compute` actually ran.
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        *self.last.lock_ignore_poison() = None;
    }
}

type InformationInputs = (MatlabStatus, Option<ErrorInfo>, bool, bool);

/// Memoized versions of the projections the UI reads on every render.
#[derive(Debug, Default)]
pub struct MemoizedSelectors {
    connection_error: Memo<(u32, bool, bool), bool>,
    overlay_hidable: Memo<(MatlabStatus, bool, bool, bool), bool>,
    fetch_status_period: Memo<(bool, bool, bool, bool), Option<Duration>>,
    information_details: Memo<InformationInputs, Result<InformationDetails, StatusError>>,
}

impl MemoizedSelectors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connection_error(&self, status: &StatusSnapshot) -> bool {
        let inputs = (
            selectors::server_status_fetch_fail_count(status),
            selectors::is_concurrency_enabled(status),
            selectors::is_concurrent(status),
        );
        self.connection_error
            .get(inputs, |&(fails, enabled, concurrent)| selectors::connection_error(fails, enabled, concurrent))
    }

    pub fn overlay_hidable(&self, status: &StatusSnapshot) -> bool {
        let inputs = (
            selectors::matlab_status(status).clone(),
            selectors::is_error(status),
            selectors::auth_enabled(status),
            selectors::is_authenticated(status),
        );
        self.overlay_hidable.get(inputs, |(matlab_status, is_error, auth_enabled, authenticated)| {
            selectors::overlay_hidable_from(matlab_status, *is_error, *auth_enabled, *authenticated)
        })
    }

    pub fn fetch_status_period(&self, status: &StatusSnapshot) -> Option<Duration> {
        let inputs = (
            status.server_status.is_submitting,
            status.server_status.is_fetching,
            selectors::is_concurrency_enabled(status),
            selectors::is_concurrent(status),
        );
        self.fetch_status_period
            .get(inputs, |&(submitting, fetching, enabled, concurrent)| {
                selectors::status_period(submitting, fetching, enabled, concurrent)
            })
    }

    pub fn information_details(&self, status: &StatusSnapshot) -> Result<InformationDetails, StatusError> {
        let auth_enabled = selectors::auth_enabled(status);
        let inputs = (
            selectors::matlab_status(status).clone(),
            selectors::error(status).cloned(),
            auth_enabled,
            selectors::is_invalid_token_error(status),
        );
        self.information_details
            .get(inputs, |(matlab_status, error, auth_enabled, invalid_token)| {
                details_for(matlab_status, error.as_ref(), *auth_enabled, *invalid_token)
            })
    }

    /// Total recomputations across all projections.
    pub fn computations(&self) -> usize {
        self.connection_error.computations()
            + self.overlay_hidable.computations()
            + self.fetch_status_period.computations()
            + self.information_details.computations()
    }
}
