//! API data transfer objects.
//!
//! Request and response bodies exchanged over the `/api/*` endpoints. The server converts
//! between these and its domain models at the controller boundary.

pub mod api;
pub mod attendance;
pub mod chat;
pub mod invitation;
pub mod manual;
pub mod meeting;
pub mod organization;
pub mod task;
pub mod user;
