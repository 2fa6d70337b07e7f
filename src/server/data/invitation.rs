use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{
    model::organization::MemberRole,
    server::{
        data::is_unique_violation,
        model::invitation::{CreateInvitationParams, Invitation, Redemption},
    },
};

pub struct InvitationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InvitationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateInvitationParams) -> Result<Invitation, DbErr> {
        let invitation = entity::invitation::ActiveModel {
            organization_id: ActiveValue::Set(params.organization_id),
            code: ActiveValue::Set(params.code),
            created_by: ActiveValue::Set(params.created_by),
            expires_at: ActiveValue::Set(params.expires_at),
            max_uses: ActiveValue::Set(params.max_uses),
            use_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Invitation::from_entity(invitation))
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<Invitation>, DbErr> {
        let invitation = entity::prelude::Invitation::find()
            .filter(entity::invitation::Column::Code.eq(code))
            .one(self.db)
            .await?;

        Ok(invitation.map(Invitation::from_entity))
    }

    pub async fn code_exists(&self, code: &str) -> Result<bool, DbErr> {
        Ok(self.find_by_code(code).await?.is_some())
    }

    /// Invitations of an organization, newest first.
    pub async fn get_by_organization(
        &self,
        organization_id: i32,
    ) -> Result<Vec<Invitation>, DbErr> {
        let invitations = entity::prelude::Invitation::find()
            .filter(entity::invitation::Column::OrganizationId.eq(organization_id))
            .order_by_desc(entity::invitation::Column::CreatedAt)
            .order_by_desc(entity::invitation::Column::Id)
            .all(self.db)
            .await?;

        Ok(invitations.into_iter().map(Invitation::from_entity).collect())
    }

    /// Counts a use of the invitation and adds the user to its organization as a member.
    ///
    /// Both writes share one transaction. The use is only counted while below `max_uses`,
    /// checked in the same `UPDATE` as the increment, and is rolled back when the membership
    /// row already exists.
    ///
    /// # Returns
    /// - `Ok(Redemption::Joined)` - Use counted, membership inserted
    /// - `Ok(Redemption::Exhausted)` - Invitation missing or out of uses
    /// - `Ok(Redemption::AlreadyMember)` - Membership exists, use not counted
    pub async fn redeem(
        &self,
        id: i32,
        organization_id: i32,
        user_id: i32,
    ) -> Result<Redemption, DbErr> {
        let txn = self.db.begin().await?;

        let counted = entity::prelude::Invitation::update_many()
            .col_expr(
                entity::invitation::Column::UseCount,
                Expr::cust("use_count + 1"),
            )
            .filter(entity::invitation::Column::Id.eq(id))
            .filter(
                Condition::any()
                    .add(entity::invitation::Column::MaxUses.is_null())
                    .add(Expr::cust("use_count < max_uses")),
            )
            .exec(&txn)
            .await?;

        if counted.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(Redemption::Exhausted);
        }

        let inserted = entity::organization_member::ActiveModel {
            organization_id: ActiveValue::Set(organization_id),
            user_id: ActiveValue::Set(user_id),
            role: ActiveValue::Set(MemberRole::Member.as_str().to_string()),
            joined_at: ActiveValue::Set(Utc::now()),
        }
        .insert(&txn)
        .await;

        match inserted {
            Ok(_) => {
                txn.commit().await?;
                Ok(Redemption::Joined)
            }
            Err(err) if is_unique_violation(&err) => {
                txn.rollback().await?;
                Ok(Redemption::AlreadyMember)
            }
            Err(err) => Err(err),
        }
    }

    /// Deletes an invitation if it belongs to the organization.
    pub async fn delete(&self, organization_id: i32, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Invitation::delete_many()
            .filter(entity::invitation::Column::Id.eq(id))
            .filter(entity::invitation::Column::OrganizationId.eq(organization_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
