//! Organization factory and membership helpers.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test organizations.
///
/// The owner is inserted as an `owner` member, matching what the organization
/// service does on creation.
pub struct OrganizationFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: i32,
    name: String,
    description: Option<String>,
}

impl<'a> OrganizationFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, owner_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            owner_id,
            name: format!("Organization {}", id),
            description: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub async fn build(self) -> Result<entity::organization::Model, DbErr> {
        let organization = entity::organization::ActiveModel {
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(self.description),
            owner_id: ActiveValue::Set(self.owner_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        add_member(self.db, organization.id, self.owner_id, "owner").await?;

        Ok(organization)
    }
}

/// Creates an organization owned by `owner_id` with default values.
pub async fn create_organization(
    db: &DatabaseConnection,
    owner_id: i32,
) -> Result<entity::organization::Model, DbErr> {
    OrganizationFactory::new(db, owner_id).build().await
}

/// Adds a user to an organization with the given role string.
pub async fn add_member(
    db: &DatabaseConnection,
    organization_id: i32,
    user_id: i32,
    role: &str,
) -> Result<entity::organization_member::Model, DbErr> {
    entity::organization_member::ActiveModel {
        organization_id: ActiveValue::Set(organization_id),
        user_id: ActiveValue::Set(user_id),
        role: ActiveValue::Set(role.to_string()),
        joined_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
