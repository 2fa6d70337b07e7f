//! HTTP request handlers.
//!
//! Controllers authenticate through `AuthGuard`, convert DTOs into parameter types, call a
//! service and turn the resulting domain model back into a DTO. They contain no business
//! rules of their own.

pub mod attendance;
pub mod auth;
pub mod chat;
pub mod invitation;
pub mod manual;
pub mod meeting;
pub mod organization;
pub mod task;
pub mod user;

use crate::server::error::AppError;

#[cfg(test)]
mod test;

/// Items per page when `entries` is omitted.
pub(crate) fn default_entries() -> u64 {
    10
}

/// Largest accepted `entries` value.
const MAX_ENTRIES: u64 = 100;

/// Clamps `entries` and rejects a `page` whose row offset would not fit in a query.
///
/// # Returns
/// - `Ok((page, entries))` - Values safe to hand to a paginator
/// - `Err(AppError::BadRequest)` - `page * entries` overflows a signed 64-bit offset
pub(crate) fn page_window(page: u64, entries: u64) -> Result<(u64, u64), AppError> {
    let entries = entries.clamp(1, MAX_ENTRIES);

    match page.checked_mul(entries) {
        Some(offset) if offset <= i64::MAX as u64 => Ok((page, entries)),
        _ => Err(AppError::BadRequest("Page number is out of range".to_string())),
    }
}
