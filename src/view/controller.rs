//! Binds user actions to client operations and keeps the view in sync.

use log::warn;

use super::{ViewError, ViewState};
use crate::api::{ApiError, EchoClient, Method, RequestPayload, ResponsePayload};
use crate::render::Render;

/// A user-triggered action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Get,
    Post(RequestPayload),
}

impl Action {
    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::Get => Method::Get,
            Self::Post(_) => Method::Post,
        }
    }
}

/// Owns the client, the view state and the renderer.
///
/// Every [`Controller::dispatch`] renders twice: once after entering the
/// loading state and once after the call settles.
pub struct Controller<R> {
    client: EchoClient,
    state: ViewState,
    renderer: R,
}

impl<R: Render> Controller<R> {
    pub fn new(client: EchoClient, renderer: R) -> Self {
        Self {
            client,
            state: ViewState::new(),
            renderer,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn client(&self) -> &EchoClient {
        &self.client
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Draw the current state without changing it.
    ///
    /// # Errors
    ///
    /// Propagates renderer failures.
    pub fn render(&mut self) -> anyhow::Result<()> {
        self.renderer.render(&self.state, self.client.endpoint())
    }

    /// Run `action` to completion.
    ///
    /// Request failures are not returned: they end up in
    /// [`ViewState::error`]. Use the returned outcome to learn whether the
    /// call itself succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Busy`] (wrapped) when a call is already in
    /// flight, or the renderer's error when drawing the settled state fails.
    pub async fn dispatch(&mut self, action: Action) -> Result<Outcome, DispatchError> {
        let method = action.method();
        self.state.begin(method)?;
        // The call still has to run so the state can leave `loading`.
        if let Err(e) = self.render() {
            warn!("failed to render loading state: {e}");
        }
        let result = match &action {
            Action::Get => self.client.get().await,
            Action::Post(payload) => self.client.post(payload).await,
        };
        let outcome = self.settle(method, result);
        self.render()?;
        Ok(outcome)
    }

    fn settle(&mut self, method: Method, result: Result<ResponsePayload, ApiError>) -> Outcome {
        match result {
            Ok(payload) => {
                self.state.succeed(payload);
                Outcome::Succeeded
            }
            Err(err) => {
                warn!("{method} request to {} failed: {err}", self.client.endpoint());
                self.state.fail(method, &err);
                Outcome::Failed
            }
        }
    }
}

/// Whether a dispatched call produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

/// Failures that prevent an action from running or being displayed.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    View(#[from] ViewError),
    #[error(transparent)]
    Render(#[from] anyhow::Error),
}
