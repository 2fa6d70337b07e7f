//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories. They enforce business rules,
//! coordinate repository calls and convert entity rows into domain models. Each service
//! borrows the database connection for the duration of a request.

pub mod attendance;
pub mod auth;
pub mod chat;
pub mod invitation;
pub mod manual;
pub mod meeting;
pub mod organization;
pub mod task;
pub mod user;

#[cfg(test)]
mod test;
