//! The abort signal: an error that stops a retry session immediately.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::Display;

/// Property keys owned by [`AbortError`] itself; never overwritten by a copy.
const RESERVED_PROPERTIES: [&str; 2] = ["name", "message"];

/// An error that ends a retry session on the spot.
///
/// When an operation fails with an `AbortError`, the retrier surfaces it as
/// the final error without waiting and without invoking the operation again,
/// however much of the attempt budget is left.
///
/// An `AbortError` either carries a plain message or wraps the underlying
/// error. A wrapped error keeps its message, is reachable through
/// [`get_ref`](Self::get_ref) and [`std::error::Error::source`], and can have
/// its serializable fields copied into [`properties`](Self::properties).
///
/// # Examples
///
/// ```rust
/// use reattempt::AbortError;
///
/// let abort = AbortError::<std::io::Error>::msg("credentials revoked");
/// assert_eq!(abort.message(), "credentials revoked");
/// assert_eq!(abort.name(), "AbortError");
///
/// let abort = AbortError::new(std::io::Error::other("disk full"));
/// assert_eq!(abort.to_string(), "disk full");
/// assert!(abort.get_ref().is_some());
/// ```
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct AbortError<E> {
    message: String,
    #[source]
    inner: Option<E>,
    properties: Map<String, Value>,
}

impl<E> AbortError<E> {
    /// Kind identifier carried by every abort.
    pub const NAME: &'static str = "AbortError";

    /// Create an abort from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            inner: None,
            properties: Map::new(),
        }
    }

    /// Wrap an existing error, keeping its message.
    pub fn new(inner: E) -> Self
    where
        E: Display,
    {
        Self {
            message: inner.to_string(),
            inner: Some(inner),
            properties: Map::new(),
        }
    }

    /// Wrap an existing error and copy its serializable fields.
    ///
    /// The error is serialized and each top-level field of the resulting
    /// object is copied into [`properties`](Self::properties). The copy is
    /// best effort: reserved keys (`name`, `message`) are skipped, and an
    /// error that fails to serialize, or is not serialized as an object,
    /// contributes no properties. The wrap itself never fails.
    ///
    /// ```rust
    /// use reattempt::AbortError;
    /// use serde::Serialize;
    ///
    /// #[derive(Debug, Serialize, thiserror::Error)]
    /// #[error("my error")]
    /// struct CodedError {
    ///     code: &'static str,
    /// }
    ///
    /// let abort = AbortError::with_properties(CodedError { code: "test" });
    /// assert_eq!(abort.message(), "my error");
    /// assert_eq!(abort.property("code"), Some(&serde_json::json!("test")));
    /// assert_eq!(abort.get_ref().map(|e| e.code), Some("test"));
    /// ```
    pub fn with_properties(inner: E) -> Self
    where
        E: Display + Serialize,
    {
        let properties = match serde_json::to_value(&inner) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => Map::new(),
            Err(error) => {
                tracing::debug!(%error, "skipping property copy for abort error");
                Map::new()
            }
        };

        let mut abort = Self::new(inner);
        for (key, value) in properties {
            abort.insert_property(key, value);
        }
        abort
    }

    /// Attach a property, builder style.
    ///
    /// A value that fails to serialize, or a reserved key, is skipped.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(value) => self.insert_property(key, value),
            Err(error) => tracing::debug!(%key, %error, "skipping abort property"),
        }
        self
    }

    fn insert_property(&mut self, key: String, value: Value) {
        if RESERVED_PROPERTIES.contains(&key.as_str()) {
            return;
        }
        self.properties.insert(key, value);
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Always [`AbortError::NAME`].
    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    /// The wrapped error, if this abort was built from one.
    pub fn get_ref(&self) -> Option<&E> {
        self.inner.as_ref()
    }

    /// Consume the abort, returning the wrapped error if any.
    pub fn into_inner(self) -> Option<E> {
        self.inner
    }

    /// Look up a copied or attached property.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// All copied or attached properties.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }
}
