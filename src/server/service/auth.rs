use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{CreateUserParams, User},
    util::password::{hash_password, verify_password},
};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub struct RegisterParams {
    pub email: String,
    pub name: String,
    pub password: String,
    pub department: Option<String>,
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account. The first account ever created becomes an admin.
    ///
    /// # Returns
    /// - `Ok(User)` - Newly created user
    /// - `Err(AppError::Validation)` - Invalid email, empty name, short password or
    ///   email already registered
    pub async fn register(&self, params: RegisterParams) -> Result<User, AppError> {
        let email = params.email.trim().to_lowercase();
        let name = params.name.trim().to_string();

        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("A valid email is required"));
        }
        if name.is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if params.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let repo = UserRepository::new(self.db);

        if repo.email_exists(&email).await? {
            return Err(AppError::validation("Email is already registered"));
        }

        let admin = repo.count().await? == 0;
        let password_hash = hash_password(&params.password)?;

        let user = repo
            .create(CreateUserParams {
                email,
                name,
                password_hash,
                department: params
                    .department
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty()),
                admin,
            })
            .await?;

        if admin {
            tracing::info!("First user {} registered as admin", user.id);
        }

        Ok(user)
    }

    /// Verifies credentials and returns the matching user.
    ///
    /// Unknown emails and wrong passwords produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);

        let Some((user, password_hash)) = repo
            .find_credentials_by_email(&email.trim().to_lowercase())
            .await?
        else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }
}
