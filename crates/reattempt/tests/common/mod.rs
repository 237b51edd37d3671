//! Shared helpers for retry integration tests

#![allow(dead_code)]

use reattempt::Error;
use serde::Serialize;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Counts invocations of an operation; cheap to clone into closures.
#[derive(Debug, Clone, Default)]
pub struct Invocations(Arc<AtomicU32>);

impl Invocations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one invocation and return its 1-based number.
    pub fn record(&self) -> u32 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn count(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }
}

/// An ordinary, retryable failure.
pub fn failure(message: impl Into<String>) -> Error<io::Error> {
    Error::Failed(io::Error::other(message.into()))
}

/// Error carrying an extra field, for abort property tests.
#[derive(Debug, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct CodedError {
    pub message: String,
    pub code: String,
}

impl CodedError {
    pub fn new(message: &str, code: &str) -> Self {
        Self {
            message: message.to_string(),
            code: code.to_string(),
        }
    }
}
