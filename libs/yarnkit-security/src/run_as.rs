//! Privileged execution under a user identity.
//!
//! The identity is passed explicitly to the action instead of being installed
//! in ambient thread-local state. [`CancellableIdentityContext`] additionally
//! enters a `run_as` tracing span for the duration of the action.

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::identity::UserIdentity;

/// The run-as step was interrupted before its action produced a usable result.
#[derive(Debug, Clone, Error)]
#[error("run as '{user}' interrupted: {reason}")]
pub struct Interrupted {
    user: String,
    reason: String,
}

impl Interrupted {
    #[must_use]
    pub fn new(user: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Failure of [`IdentityContext::run_as`].
#[derive(Debug, Error)]
pub enum RunAsError<E> {
    #[error(transparent)]
    Interrupted(#[from] Interrupted),

    /// The action itself failed. The error is passed through untouched.
    #[error(transparent)]
    Action(E),
}

/// Executes work on behalf of a user identity.
pub trait IdentityContext {
    /// Run `action` as `identity`, blocking the caller until it completes.
    ///
    /// # Errors
    /// - `Interrupted` if execution was interrupted; any result the action
    ///   produced is discarded
    /// - `Action` with the action's own error otherwise
    fn run_as<T, E, F>(&self, identity: &UserIdentity, action: F) -> Result<T, RunAsError<E>>
    where
        F: FnOnce(&UserIdentity) -> Result<T, E>;
}

/// [`IdentityContext`] that can be interrupted through a [`CancellationToken`].
///
/// Cancellation is checked before the action starts and again once it returns;
/// the action itself is never pre-empted.
#[derive(Debug, Clone, Default)]
pub struct CancellableIdentityContext {
    cancel: CancellationToken,
}

impl CancellableIdentityContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    #[must_use]
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

impl IdentityContext for CancellableIdentityContext {
    fn run_as<T, E, F>(&self, identity: &UserIdentity, action: F) -> Result<T, RunAsError<E>>
    where
        F: FnOnce(&UserIdentity) -> Result<T, E>,
    {
        let span = tracing::debug_span!(
            "run_as",
            user = %identity.user_name(),
            auth = %identity.authentication_method(),
        );
        let _entered = span.enter();

        if self.cancel.is_cancelled() {
            warn!("run_as cancelled before the action started");
            return Err(Interrupted::new(identity.user_name(), "cancelled before start").into());
        }

        let outcome = action(identity);

        if self.cancel.is_cancelled() {
            warn!("run_as cancelled while the action was outstanding, discarding its result");
            return Err(Interrupted::new(identity.user_name(), "cancelled while running").into());
        }

        outcome.map_err(RunAsError::Action)
    }
}
