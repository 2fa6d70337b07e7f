//! Invitation factory for creating test invitation codes.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct InvitationFactory<'a> {
    db: &'a DatabaseConnection,
    organization_id: i32,
    created_by: i32,
    code: String,
    expires_at: Option<DateTime<Utc>>,
    max_uses: Option<i32>,
    use_count: i32,
}

impl<'a> InvitationFactory<'a> {
    /// Defaults to a unique code with no expiry, no usage limit and zero uses.
    pub fn new(db: &'a DatabaseConnection, organization_id: i32, created_by: i32) -> Self {
        Self {
            db,
            organization_id,
            created_by,
            code: format!("CODE{:06}", next_id()),
            expires_at: None,
            max_uses: None,
            use_count: 0,
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn max_uses(mut self, max_uses: i32) -> Self {
        self.max_uses = Some(max_uses);
        self
    }

    pub fn use_count(mut self, use_count: i32) -> Self {
        self.use_count = use_count;
        self
    }

    pub async fn build(self) -> Result<entity::invitation::Model, DbErr> {
        entity::invitation::ActiveModel {
            organization_id: ActiveValue::Set(self.organization_id),
            code: ActiveValue::Set(self.code),
            created_by: ActiveValue::Set(self.created_by),
            expires_at: ActiveValue::Set(self.expires_at),
            max_uses: ActiveValue::Set(self.max_uses),
            use_count: ActiveValue::Set(self.use_count),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_invitation(
    db: &DatabaseConnection,
    organization_id: i32,
    created_by: i32,
) -> Result<entity::invitation::Model, DbErr> {
    InvitationFactory::new(db, organization_id, created_by)
        .build()
        .await
}
