//! SeaORM entities for the workdesk schema.
//!
//! Each module mirrors one table created by the `migration` crate.

pub mod prelude;

pub mod attendance;
pub mod chat_room;
pub mod chat_room_member;
pub mod invitation;
pub mod manual;
pub mod meeting;
pub mod meeting_participant;
pub mod message;
pub mod organization;
pub mod organization_member;
pub mod task;
pub mod task_tag;
pub mod user;
