//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation. Factories take the ids of
//! the rows they reference, so parents are created first.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::create_user(&db).await?;
//! let organization = factory::organization::create_organization(&db, user.id).await?;
//!
//! let admin = factory::user::UserFactory::new(&db)
//!     .department("Engineering")
//!     .admin(true)
//!     .build()
//!     .await?;
//! ```

pub mod attendance;
pub mod chat_room;
pub mod helpers;
pub mod invitation;
pub mod manual;
pub mod meeting;
pub mod message;
pub mod organization;
pub mod task;
pub mod user;

pub use chat_room::{create_direct_room, create_group_room};
pub use invitation::create_invitation;
pub use message::create_message;
pub use organization::{add_member, create_organization};
pub use task::create_task;
pub use user::create_user;
