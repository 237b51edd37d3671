//! The retry loop and its entry points.
//!
//! # Key Types
//!
//! - [`Retrier`] - Runs operations under a [`RetryConfig`](crate::RetryConfig)
//! - [`AbortError`] - Ends a session immediately, regardless of budget
//!
//! # Examples
//!
//! ```rust
//! use reattempt::Error;
//! use reattempt::RetryConfig;
//! use reattempt::retry::{self, AbortError};
//! use std::io;
//!
//! async fn fetch() -> Result<u32, io::Error> {
//!     Ok(42)
//! }
//!
//! # async fn example() -> Result<(), Error<io::Error>> {
//! let config = RetryConfig::builder().attempts(5).delay_ms(100).build();
//!
//! let value = retry::retry_with(|| async {
//!     match fetch().await {
//!         Ok(value) => Ok(value),
//!         Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
//!             Err(Error::Aborted(AbortError::new(err)))
//!         }
//!         Err(err) => Err(Error::Failed(err)),
//!     }
//! }, config).await?;
//!
//! assert_eq!(value, 42);
//! # Ok(())
//! # }
//! ```

mod retrier;

pub use crate::abort::AbortError;
pub use retrier::{Retrier, retry, retry_with};
