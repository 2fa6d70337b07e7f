//! Authorization guard used at the top of every protected handler.
//!
//! `AuthGuard::require` resolves the session user and checks each requested permission in
//! order, failing on the first one that is not met. Organization and chat room permissions
//! answer 404 for missing resources before checking membership.

use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::{
    model::organization::MemberRole,
    server::{
        data::{
            chat_room::ChatRoomRepository, organization::OrganizationRepository,
            user::UserRepository,
        },
        error::{auth::AuthError, AppError},
        middleware::session::AuthSession,
        model::{parse_stored, user::User},
    },
};

pub enum Permission {
    /// Site-wide administrator.
    Admin,
    /// Any role in the organization.
    OrganizationMember(i32),
    /// Owner or admin of the organization.
    OrganizationManager(i32),
    OrganizationOwner(i32),
    ChatRoomMember(i32),
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Returns the logged-in user once all `permissions` are satisfied.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated user holding every permission
    /// - `Err(AuthError::NotAuthenticated)` - No user in session
    /// - `Err(AuthError::UserNotInDatabase)` - Session references a deleted user
    /// - `Err(AuthError::AccessDenied)` - A permission check failed
    /// - `Err(AppError::NotFound)` - Organization or chat room does not exist
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::NotAuthenticated.into());
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !user.admin {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            "admin permission required".to_string(),
                        )
                        .into());
                    }
                }
                Permission::OrganizationMember(organization_id) => {
                    self.organization_role(&user, *organization_id).await?;
                }
                Permission::OrganizationManager(organization_id) => {
                    let role = self.organization_role(&user, *organization_id).await?;
                    if !role.can_manage() {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            format!("organization {} requires owner or admin role", organization_id),
                        )
                        .into());
                    }
                }
                Permission::OrganizationOwner(organization_id) => {
                    let role = self.organization_role(&user, *organization_id).await?;
                    if role != MemberRole::Owner {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            format!("organization {} requires owner role", organization_id),
                        )
                        .into());
                    }
                }
                Permission::ChatRoomMember(room_id) => {
                    let repo = ChatRoomRepository::new(self.db);
                    if repo.find_by_id(*room_id).await?.is_none() {
                        return Err(AppError::not_found("Chat room"));
                    }
                    if !repo.is_member(*room_id, user.id).await? {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            format!("not a member of chat room {}", room_id),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }

    async fn organization_role(
        &self,
        user: &User,
        organization_id: i32,
    ) -> Result<MemberRole, AppError> {
        let repo = OrganizationRepository::new(self.db);

        if repo.find_by_id(organization_id).await?.is_none() {
            return Err(AppError::not_found("Organization"));
        }

        let Some(member) = repo.find_member(organization_id, user.id).await? else {
            return Err(AuthError::AccessDenied(
                user.id,
                format!("not a member of organization {}", organization_id),
            )
            .into());
        };

        parse_stored("organization_member.role", member.role, MemberRole::parse)
    }
}
