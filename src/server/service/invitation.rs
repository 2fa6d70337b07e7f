use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::invitation::CreateInvitationDto,
    server::{
        data::{invitation::InvitationRepository, organization::OrganizationRepository},
        error::AppError,
        model::{
            invitation::{CreateInvitationParams, Invitation, Redemption},
            organization::MemberOrganization,
        },
        service::organization::OrganizationService,
        util::code::generate_invitation_code,
    },
};

/// Attempts at drawing an unused code before giving up.
const CODE_ATTEMPTS: usize = 5;

pub struct InvitationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InvitationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an invitation code for an organization.
    ///
    /// # Returns
    /// - `Err(AppError::Validation)` - Non-positive or out-of-range expiry, non-positive usage limit
    pub async fn create(
        &self,
        organization_id: i32,
        created_by: i32,
        dto: CreateInvitationDto,
        now: DateTime<Utc>,
    ) -> Result<Invitation, AppError> {
        if dto.expires_in_hours.is_some_and(|h| h <= 0) {
            return Err(AppError::validation("Expiry must be a positive number of hours"));
        }
        if dto.max_uses.is_some_and(|m| m <= 0) {
            return Err(AppError::validation("Usage limit must be positive"));
        }

        let expires_at = match dto.expires_in_hours {
            Some(hours) => Some(
                Duration::try_hours(hours)
                    .and_then(|ttl| now.checked_add_signed(ttl))
                    .ok_or_else(|| AppError::validation("Expiry is too far in the future"))?,
            ),
            None => None,
        };

        let repo = InvitationRepository::new(self.db);

        let mut code = None;
        for _ in 0..CODE_ATTEMPTS {
            let candidate = generate_invitation_code();
            if !repo.code_exists(&candidate).await? {
                code = Some(candidate);
                break;
            }
        }
        let Some(code) = code else {
            return Err(AppError::InternalError(
                "Could not generate a unique invitation code".to_string(),
            ));
        };

        let invitation = repo
            .create(CreateInvitationParams {
                organization_id,
                created_by,
                code,
                expires_at,
                max_uses: dto.max_uses,
            })
            .await?;

        Ok(invitation)
    }

    pub async fn get_by_organization(
        &self,
        organization_id: i32,
    ) -> Result<Vec<Invitation>, AppError> {
        Ok(InvitationRepository::new(self.db)
            .get_by_organization(organization_id)
            .await?)
    }

    pub async fn revoke(&self, organization_id: i32, invitation_id: i32) -> Result<(), AppError> {
        if !InvitationRepository::new(self.db)
            .delete(organization_id, invitation_id)
            .await?
        {
            return Err(AppError::not_found("Invitation"));
        }

        Ok(())
    }

    /// Redeems a code, adding the user to its organization as a `member`.
    ///
    /// # Returns
    /// - `Ok(MemberOrganization)` - The organization joined
    /// - `Err(AppError::NotFound)` - Unknown code
    /// - `Err(AppError::Validation)` - Expired, exhausted or already a member
    pub async fn join(
        &self,
        code: &str,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<MemberOrganization, AppError> {
        let repo = InvitationRepository::new(self.db);
        let organization_repo = OrganizationRepository::new(self.db);

        let code = code.trim().to_uppercase();
        let Some(invitation) = repo.find_by_code(&code).await? else {
            return Err(AppError::not_found("Invitation"));
        };

        if invitation.is_expired(now) {
            return Err(AppError::validation("Invitation has expired"));
        }
        if invitation.is_exhausted() {
            return Err(AppError::validation(
                "Invitation has reached its usage limit",
            ));
        }
        if organization_repo
            .find_member(invitation.organization_id, user_id)
            .await?
            .is_some()
        {
            return Err(AppError::validation("Already a member"));
        }

        match repo
            .redeem(invitation.id, invitation.organization_id, user_id)
            .await?
        {
            Redemption::Joined => {}
            Redemption::Exhausted => {
                return Err(AppError::validation(
                    "Invitation has reached its usage limit",
                ))
            }
            Redemption::AlreadyMember => return Err(AppError::validation("Already a member")),
        }

        tracing::info!(
            "User {} joined organization {} with invitation {}",
            user_id,
            invitation.organization_id,
            invitation.id
        );

        OrganizationService::new(self.db)
            .get_for_member(invitation.organization_id, user_id)
            .await
    }
}
