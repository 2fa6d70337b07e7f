use sea_orm::DatabaseConnection;

use crate::server::{data::user::UserRepository, error::AppError, model::user::User};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists every user, ordered by name.
    pub async fn get_all(&self) -> Result<Vec<User>, AppError> {
        Ok(UserRepository::new(self.db).get_all().await?)
    }

    /// Fails with 404 unless every id belongs to an existing user.
    pub async fn ensure_exist(&self, ids: &[i32]) -> Result<(), AppError> {
        let existing = UserRepository::new(self.db).existing_ids(ids).await?;

        if ids.iter().all(|id| existing.contains(id)) {
            Ok(())
        } else {
            Err(AppError::not_found("User"))
        }
    }
}
