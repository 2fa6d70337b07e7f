//! Database repository layer.
//!
//! Repositories perform all queries, inserts, updates and deletes through SeaORM entities and
//! return domain models (or entity rows when conversion can fail, leaving it to the service).
//! Errors are surfaced as `DbErr`.

pub mod attendance;
pub mod chat_room;
pub mod invitation;
pub mod manual;
pub mod meeting;
pub mod message;
pub mod organization;
pub mod task;
pub mod user;

use sea_orm::{DbErr, SqlErr};

#[cfg(test)]
mod test;

/// Whether an insert or update failed on a unique index or primary key.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
