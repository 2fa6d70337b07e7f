//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and
//! transformed to DTOs at the controller boundary. Parameter types carry the input of a
//! single repository or service operation.

pub mod attendance;
pub mod chat;
pub mod invitation;
pub mod manual;
pub mod meeting;
pub mod organization;
pub mod task;
pub mod user;

use crate::server::error::{internal::InternalError, AppError};

/// Parses a stored enum column, reporting unknown values as internal errors.
pub(crate) fn parse_stored<T>(
    column: &'static str,
    value: String,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, AppError> {
    match parse(&value) {
        Some(parsed) => Ok(parsed),
        None => Err(InternalError::UnknownStoredValue { column, value }.into()),
    }
}

/// Number of pages needed for `total` items at `per_page` items each.
pub(crate) fn total_pages(total: u64, per_page: u64) -> u64 {
    if per_page > 0 {
        total.div_ceil(per_page)
    } else {
        0
    }
}
