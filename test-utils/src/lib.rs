//! Test scaffolding for the workdesk server.
//!
//! `TestBuilder` creates an in-memory SQLite database with the tables a test needs, derived
//! straight from the `entity` crate. `factory` inserts rows with unique defaults so tests
//! only spell out the fields they assert on.
//!
//! ```rust,ignore
//! let test = TestBuilder::new().with_task_tables().build().await?;
//! let db = test.db.as_ref().unwrap();
//!
//! let (owner, member, organization) = factory::helpers::create_organization_with_member(db).await?;
//! factory::task::TaskFactory::new(db, owner.id)
//!     .organization_id(organization.id)
//!     .build()
//!     .await?;
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
