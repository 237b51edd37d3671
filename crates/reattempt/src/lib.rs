#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Retry a fallible async operation a bounded number of times.
//!
//! `reattempt` invokes an operation, and on failure invokes it again after a
//! fixed pause, until it succeeds, the attempt budget is spent, or the
//! operation signals that retrying is pointless:
//!
//! - **Fixed budget and interval** via [`RetryConfig`] (3 attempts, 250ms apart by default)
//! - **Abort signal** via [`AbortError`], which ends a session on its first occurrence
//! - **Last error wins**: on exhaustion the caller sees the final attempt's error
//!
//! Attempts never overlap. Each call to [`retry`] or [`Retrier::run`] is an
//! independent session with its own budget.
//!
//! # Examples
//!
//! ```rust
//! use reattempt::prelude::*;
//!
//! # async fn example() -> Result<(), Error<std::io::Error>> {
//! let config = RetryConfig::builder().attempts(5).delay_ms(100).build();
//!
//! let value = retry_with(|| async {
//!     Ok::<_, Error<std::io::Error>>(42)
//! }, config).await?;
//!
//! assert_eq!(value, 42);
//! # Ok(())
//! # }
//! ```
//!
//! Aborting from inside the operation:
//!
//! ```rust
//! use reattempt::prelude::*;
//!
//! # async fn example() {
//! let result = retry(|| async {
//!     Err::<(), _>(Error::abort(std::io::Error::other("invalid credentials")))
//! })
//! .await;
//!
//! let err = result.unwrap_err();
//! assert_eq!(err.name(), "AbortError");
//! assert_eq!(err.to_string(), "invalid credentials");
//! # }
//! ```

pub mod abort;
pub mod config;
pub mod error;
pub mod retry;

pub use abort::AbortError;
pub use config::{RetryConfig, RetryConfigBuilder};
pub use error::{Error, ErrorKind};
pub use retry::{Retrier, retry, retry_with};

/// Convenient re-exports of commonly used items.
///
/// ```rust
/// use reattempt::prelude::*;
/// ```
pub mod prelude {
    pub use crate::abort::AbortError;
    pub use crate::config::{RetryConfig, RetryConfigBuilder};
    pub use crate::error::{Error, ErrorKind};
    pub use crate::retry::{Retrier, retry, retry_with};
}
