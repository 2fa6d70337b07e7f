use entity::prelude::*;
use sea_orm::{
    sea_query::{Index, IndexCreateStatement, TableCreateStatement},
    EntityTrait, Schema,
};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Add entity tables, then call `build()` to create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Task};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Task)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
    /// Composite unique indexes the entities cannot declare, created after the tables.
    indexes: Vec<IndexCreateStatement>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Tables should be added in dependency order (tables with foreign keys after
    /// the tables they reference).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds an index created once every table exists.
    pub fn with_index(mut self, index: IndexCreateStatement) -> Self {
        self.indexes.push(index);
        self
    }

    /// Adds the user and organization tables (organization, members, invitations).
    pub fn with_organization_tables(self) -> Self {
        self.with_table(User)
            .with_table(Organization)
            .with_table(OrganizationMember)
            .with_table(Invitation)
    }

    /// Adds everything required for task operations.
    pub fn with_task_tables(self) -> Self {
        self.with_organization_tables()
            .with_table(Task)
            .with_table(TaskTag)
    }

    /// Adds everything required for chat rooms and messages.
    pub fn with_chat_tables(self) -> Self {
        self.with_organization_tables()
            .with_table(ChatRoom)
            .with_table(ChatRoomMember)
            .with_table(Message)
            .with_index(message_client_token_index())
    }

    /// Adds everything required for manual operations.
    pub fn with_manual_tables(self) -> Self {
        self.with_organization_tables().with_table(Manual)
    }

    /// Adds everything required for attendance operations.
    pub fn with_attendance_tables(self) -> Self {
        self.with_table(User)
            .with_table(Attendance)
            .with_index(attendance_user_date_index())
    }

    /// Adds everything required for meeting operations.
    pub fn with_meeting_tables(self) -> Self {
        self.with_organization_tables()
            .with_table(Meeting)
            .with_table(MeetingParticipant)
    }

    /// Adds every table in the schema, in dependency order.
    ///
    /// Used by router-level tests that exercise several resources at once.
    pub fn with_all_tables(self) -> Self {
        self.with_organization_tables()
            .with_table(Task)
            .with_table(TaskTag)
            .with_table(ChatRoom)
            .with_table(ChatRoomMember)
            .with_table(Message)
            .with_table(Manual)
            .with_table(Attendance)
            .with_table(Meeting)
            .with_table(MeetingParticipant)
            .with_index(message_client_token_index())
            .with_index(attendance_user_date_index())
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;
        setup.with_indexes(self.indexes).await?;

        Ok(setup)
    }
}

/// One send per client token, matching `idx_message_room_id_user_id_client_token`.
fn message_client_token_index() -> IndexCreateStatement {
    Index::create()
        .name("idx_message_room_id_user_id_client_token")
        .table(Message)
        .col(entity::message::Column::RoomId)
        .col(entity::message::Column::UserId)
        .col(entity::message::Column::ClientToken)
        .unique()
        .to_owned()
}

/// One attendance record per user and day, matching `idx_attendance_user_id_date`.
fn attendance_user_date_index() -> IndexCreateStatement {
    Index::create()
        .name("idx_attendance_user_id_date")
        .table(Attendance)
        .col(entity::attendance::Column::UserId)
        .col(entity::attendance::Column::Date)
        .unique()
        .to_owned()
}
