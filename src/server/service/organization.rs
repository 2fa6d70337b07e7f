use sea_orm::DatabaseConnection;

use crate::{
    model::organization::MemberRole,
    server::{
        data::organization::OrganizationRepository,
        error::{auth::AuthError, AppError},
        model::{
            organization::{
                CreateOrganizationParams, MemberOrganization, Organization, OrganizationMember,
                UpdateOrganizationParams,
            },
            parse_stored,
        },
    },
};

pub struct OrganizationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrganizationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an organization owned by `params.owner_id`.
    pub async fn create(
        &self,
        params: CreateOrganizationParams,
    ) -> Result<MemberOrganization, AppError> {
        if params.name.is_empty() {
            return Err(AppError::validation("Name is required"));
        }

        let organization = OrganizationRepository::new(self.db).create(params).await?;

        Ok(MemberOrganization {
            organization,
            role: MemberRole::Owner,
            member_count: 1,
        })
    }

    /// Organizations the user belongs to, with their role in each.
    pub async fn get_for_user(&self, user_id: i32) -> Result<Vec<MemberOrganization>, AppError> {
        let repo = OrganizationRepository::new(self.db);

        let mut organizations = Vec::new();
        for (organization, member) in repo.get_for_user(user_id).await? {
            let member_count = repo.count_members(organization.id).await?;
            organizations.push(MemberOrganization {
                organization,
                role: parse_stored("organization_member.role", member.role, MemberRole::parse)?,
                member_count,
            });
        }

        Ok(organizations)
    }

    /// Gets an organization as seen by one of its members.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Organization missing or user is not a member
    pub async fn get_for_member(
        &self,
        organization_id: i32,
        user_id: i32,
    ) -> Result<MemberOrganization, AppError> {
        let repo = OrganizationRepository::new(self.db);

        let organization = repo
            .find_by_id(organization_id)
            .await?
            .ok_or_else(|| AppError::not_found("Organization"))?;

        let member = repo
            .find_member(organization_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Organization"))?;

        Ok(MemberOrganization {
            organization,
            role: parse_stored("organization_member.role", member.role, MemberRole::parse)?,
            member_count: repo.count_members(organization_id).await?,
        })
    }

    pub async fn update(
        &self,
        params: UpdateOrganizationParams,
        user_id: i32,
    ) -> Result<MemberOrganization, AppError> {
        if params.name.as_deref().is_some_and(str::is_empty) {
            return Err(AppError::validation("Name is required"));
        }

        let id = params.id;
        OrganizationRepository::new(self.db)
            .update(params)
            .await?
            .ok_or_else(|| AppError::not_found("Organization"))?;

        self.get_for_member(id, user_id).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !OrganizationRepository::new(self.db).delete(id).await? {
            return Err(AppError::not_found("Organization"));
        }

        Ok(())
    }

    pub async fn get_members(
        &self,
        organization_id: i32,
    ) -> Result<Vec<OrganizationMember>, AppError> {
        OrganizationRepository::new(self.db)
            .get_members(organization_id)
            .await?
            .into_iter()
            .map(|(member, user)| OrganizationMember::from_entity(member, user))
            .collect()
    }

    /// Removes a member. The owner cannot be removed.
    pub async fn remove_member(&self, organization_id: i32, user_id: i32) -> Result<(), AppError> {
        let organization = self.find(organization_id).await?;

        if organization.owner_id == user_id {
            return Err(AppError::validation("The owner cannot be removed"));
        }

        if !OrganizationRepository::new(self.db)
            .remove_member(organization_id, user_id)
            .await?
        {
            return Err(AppError::not_found("Member"));
        }

        Ok(())
    }

    /// Leaves an organization. The owner has to delete it instead.
    pub async fn leave(&self, organization_id: i32, user_id: i32) -> Result<(), AppError> {
        let organization = self.find(organization_id).await?;

        if organization.owner_id == user_id {
            return Err(AppError::validation(
                "The owner cannot leave the organization",
            ));
        }

        if !OrganizationRepository::new(self.db)
            .remove_member(organization_id, user_id)
            .await?
        {
            return Err(AppError::not_found("Member"));
        }

        Ok(())
    }

    /// Changes a member's role between `admin` and `member`.
    pub async fn change_role(
        &self,
        organization_id: i32,
        user_id: i32,
        role: MemberRole,
    ) -> Result<OrganizationMember, AppError> {
        let organization = self.find(organization_id).await?;

        if role == MemberRole::Owner {
            return Err(AppError::validation("Ownership cannot be assigned"));
        }
        if organization.owner_id == user_id {
            return Err(AppError::validation("The owner's role cannot be changed"));
        }

        let repo = OrganizationRepository::new(self.db);
        repo.set_member_role(organization_id, user_id, role)
            .await?
            .ok_or_else(|| AppError::not_found("Member"))?;

        self.get_members(organization_id)
            .await?
            .into_iter()
            .find(|m| m.user_id == user_id)
            .ok_or_else(|| AppError::not_found("Member"))
    }

    /// Fails with 403 unless the user belongs to the organization.
    pub async fn ensure_member(&self, organization_id: i32, user_id: i32) -> Result<(), AppError> {
        let repo = OrganizationRepository::new(self.db);

        if repo.find_member(organization_id, user_id).await?.is_none() {
            return Err(AuthError::AccessDenied(
                user_id,
                format!("not a member of organization {}", organization_id),
            )
            .into());
        }

        Ok(())
    }

    async fn find(&self, organization_id: i32) -> Result<Organization, AppError> {
        OrganizationRepository::new(self.db)
            .find_by_id(organization_id)
            .await?
            .ok_or_else(|| AppError::not_found("Organization"))
    }
}
