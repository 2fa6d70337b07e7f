use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{
    model::organization::MemberRole,
    server::model::organization::{
        CreateOrganizationParams, Organization, UpdateOrganizationParams,
    },
};

pub struct OrganizationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrganizationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an organization and registers its owner as an `owner` member.
    pub async fn create(&self, params: CreateOrganizationParams) -> Result<Organization, DbErr> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let organization = entity::organization::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            owner_id: ActiveValue::Set(params.owner_id),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        entity::organization_member::ActiveModel {
            organization_id: ActiveValue::Set(organization.id),
            user_id: ActiveValue::Set(params.owner_id),
            role: ActiveValue::Set(MemberRole::Owner.as_str().to_string()),
            joined_at: ActiveValue::Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(Organization::from_entity(organization))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Organization>, DbErr> {
        let organization = entity::prelude::Organization::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(organization.map(Organization::from_entity))
    }

    /// Organizations the user belongs to, with the membership row, ordered by name.
    pub async fn get_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<(Organization, entity::organization_member::Model)>, DbErr> {
        let rows = entity::prelude::OrganizationMember::find()
            .filter(entity::organization_member::Column::UserId.eq(user_id))
            .find_also_related(entity::prelude::Organization)
            .order_by_asc(entity::organization_member::Column::OrganizationId)
            .all(self.db)
            .await?;

        let mut organizations: Vec<_> = rows
            .into_iter()
            .filter_map(|(member, organization)| {
                organization.map(|o| (Organization::from_entity(o), member))
            })
            .collect();
        organizations.sort_by(|a, b| a.0.name.cmp(&b.0.name));

        Ok(organizations)
    }

    pub async fn update(
        &self,
        params: UpdateOrganizationParams,
    ) -> Result<Option<Organization>, DbErr> {
        let Some(organization) = entity::prelude::Organization::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = organization.into_active_model();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(description);
        }

        if !active.is_changed() {
            return self.find_by_id(params.id).await;
        }

        let organization = active.update(self.db).await?;

        Ok(Some(Organization::from_entity(organization)))
    }

    /// Deletes the organization; members and invitations cascade.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Organization::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_members(&self, organization_id: i32) -> Result<u64, DbErr> {
        entity::prelude::OrganizationMember::find()
            .filter(entity::organization_member::Column::OrganizationId.eq(organization_id))
            .count(self.db)
            .await
    }

    /// Member rows joined with their users, ordered by join time.
    pub async fn get_members(
        &self,
        organization_id: i32,
    ) -> Result<Vec<(entity::organization_member::Model, entity::user::Model)>, DbErr> {
        let rows = entity::prelude::OrganizationMember::find()
            .filter(entity::organization_member::Column::OrganizationId.eq(organization_id))
            .find_also_related(entity::prelude::User)
            .order_by_asc(entity::organization_member::Column::JoinedAt)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(member, user)| user.map(|u| (member, u)))
            .collect())
    }

    pub async fn find_member(
        &self,
        organization_id: i32,
        user_id: i32,
    ) -> Result<Option<entity::organization_member::Model>, DbErr> {
        entity::prelude::OrganizationMember::find_by_id((organization_id, user_id))
            .one(self.db)
            .await
    }

    pub async fn add_member(
        &self,
        organization_id: i32,
        user_id: i32,
        role: MemberRole,
    ) -> Result<entity::organization_member::Model, DbErr> {
        entity::organization_member::ActiveModel {
            organization_id: ActiveValue::Set(organization_id),
            user_id: ActiveValue::Set(user_id),
            role: ActiveValue::Set(role.as_str().to_string()),
            joined_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }

    pub async fn set_member_role(
        &self,
        organization_id: i32,
        user_id: i32,
        role: MemberRole,
    ) -> Result<Option<entity::organization_member::Model>, DbErr> {
        let Some(member) = self.find_member(organization_id, user_id).await? else {
            return Ok(None);
        };

        let mut active = member.into_active_model();
        active.role = ActiveValue::Set(role.as_str().to_string());

        Ok(Some(active.update(self.db).await?))
    }

    pub async fn remove_member(&self, organization_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let Some(member) = self.find_member(organization_id, user_id).await? else {
            return Ok(false);
        };

        let result = member.delete(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Ids of every organization the user belongs to.
    pub async fn organization_ids_for_user(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        let members = entity::prelude::OrganizationMember::find()
            .filter(entity::organization_member::Column::UserId.eq(user_id))
            .all(self.db)
            .await?;

        Ok(members.into_iter().map(|m| m.organization_id).collect())
    }
}
