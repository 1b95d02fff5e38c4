//! Transient view state and the controller driving it.
//!
//! [`ViewState`] holds the four fields the UI reflects. It changes only
//! through [`ViewState::begin`], [`ViewState::succeed`] and
//! [`ViewState::fail`]. Neither the response nor the error is cleared when
//! the other is set, so a failed call leaves the previous response in place.

mod controller;

pub use controller::{Action, Controller, DispatchError, Outcome};

use thiserror::Error;

use crate::api::{Method, ResponsePayload};

/// Errors raised by state transitions.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// A request is already in flight.
    #[error("a {0} request is already in flight")]
    Busy(Method),
}

/// UI state reflecting the latest client call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub response: Option<ResponsePayload>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_method: Option<Method>,
}

impl ViewState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the loading state for `method`.
    ///
    /// Clears the error and records the method. The previous response stays.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Busy`] if a call is already in flight; the state
    /// is left untouched.
    pub fn begin(&mut self, method: Method) -> Result<(), ViewError> {
        if self.loading {
            return Err(ViewError::Busy(self.last_method.unwrap_or(method)));
        }
        self.loading = true;
        self.error = None;
        self.last_method = Some(method);
        Ok(())
    }

    /// Store a successful response and leave the loading state.
    pub fn succeed(&mut self, payload: ResponsePayload) {
        self.response = Some(payload);
        self.loading = false;
    }

    /// Store the message of a failure and leave the loading state.
    pub fn fail(&mut self, method: Method, err: &dyn std::error::Error) {
        self.error = Some(failure_message(method, err));
        self.loading = false;
    }

    /// Whether the triggering controls accept input.
    #[must_use]
    pub const fn controls_enabled(&self) -> bool {
        !self.loading
    }
}

/// Human-readable text for a failed call.
///
/// Uses the error's own message, falling back to the per-method text when
/// that message is blank.
#[must_use]
pub fn failure_message(method: Method, err: &dyn std::error::Error) -> String {
    let text = err.to_string();
    if text.trim().is_empty() {
        method.fallback_message().to_string()
    } else {
        text
    }
}
