//! The error surfaced by a retry session.
//!
//! Operations under retry fail with [`Error<E>`]: either an ordinary failure
//! wrapping the operation's own error type, which is retried while budget
//! remains, or an [`AbortError`], which ends the session immediately.
//! `From<E>` is implemented, so `?` inside an operation classifies a failure
//! as ordinary.

use crate::abort::AbortError;
use std::fmt::Display;

/// Result alias for operations and sessions failing with [`Error<E>`].
pub type Result<T, E> = std::result::Result<T, Error<E>>;

/// Classification of a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Retryable, subject to the attempt budget.
    Ordinary,
    /// Terminal, bypasses the attempt budget.
    Abort,
}

/// Error from an operation under retry, and the final error of a session.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    /// The operation failed and may be retried.
    #[error(transparent)]
    Failed(E),

    /// The operation asked for the session to stop.
    #[error(transparent)]
    Aborted(AbortError<E>),
}

impl<E> Error<E> {
    /// Build an abort wrapping `inner`.
    ///
    /// ```rust
    /// use reattempt::{Error, ErrorKind};
    ///
    /// let err = Error::abort(std::io::Error::other("gone"));
    /// assert_eq!(err.kind(), ErrorKind::Abort);
    /// assert_eq!(err.to_string(), "gone");
    /// ```
    pub fn abort(inner: E) -> Self
    where
        E: Display,
    {
        Self::Aborted(AbortError::new(inner))
    }

    /// Build an abort carrying only a message.
    pub fn abort_msg(message: impl Into<String>) -> Self {
        Self::Aborted(AbortError::msg(message))
    }

    /// How this error is treated by the retrier.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Failed(_) => ErrorKind::Ordinary,
            Self::Aborted(_) => ErrorKind::Abort,
        }
    }

    /// Whether this error ends the session regardless of budget.
    pub fn is_abort(&self) -> bool {
        self.kind() == ErrorKind::Abort
    }

    /// `"AbortError"` for aborts, `"Error"` otherwise.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Failed(_) => "Error",
            Self::Aborted(abort) => abort.name(),
        }
    }

    /// The abort, if this is one.
    pub fn as_abort(&self) -> Option<&AbortError<E>> {
        match self {
            Self::Aborted(abort) => Some(abort),
            Self::Failed(_) => None,
        }
    }

    /// The underlying operation error. `None` for message-only aborts.
    pub fn get_ref(&self) -> Option<&E> {
        match self {
            Self::Failed(inner) => Some(inner),
            Self::Aborted(abort) => abort.get_ref(),
        }
    }

    /// Consume the error, returning the underlying operation error.
    pub fn into_inner(self) -> Option<E> {
        match self {
            Self::Failed(inner) => Some(inner),
            Self::Aborted(abort) => abort.into_inner(),
        }
    }
}

impl<E> From<E> for Error<E> {
    fn from(inner: E) -> Self {
        Self::Failed(inner)
    }
}

impl<E> From<AbortError<E>> for Error<E> {
    fn from(abort: AbortError<E>) -> Self {
        Self::Aborted(abort)
    }
}
