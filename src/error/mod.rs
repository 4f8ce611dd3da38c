//! Error types for the pet client core.
//!
//! - [`ApiError`]: a failed remote call, carrying the operation and an
//!   [`ApiErrorKind`]. Its message is what view-models show.
//! - [`StorageError`]: a failed read or write of local preferences. The
//!   theme store logs these and carries on with its in-memory value.

mod api;

pub use api::{ApiError, ApiErrorKind, ApiOperation};
pub use crate::traits::StorageError;

/// Result alias for remote client calls.
pub type ApiResult<T> = Result<T, ApiError>;
