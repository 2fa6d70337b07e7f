//! User domain models and parameters.

use chrono::{DateTime, Utc};

use crate::model::user::UserDto;

/// Account of a person using the suite.
///
/// The password hash never leaves the data layer except through
/// `UserRepository::find_credentials_by_email`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub department: Option<String>,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            department: entity.department,
            admin: entity.admin,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            name: self.name,
            department: self.department,
            admin: self.admin,
            created_at: self.created_at,
        }
    }

    /// Whether both users belong to the same, non-empty department.
    pub fn shares_department(&self, department: Option<&str>) -> bool {
        match (self.department.as_deref(), department) {
            (Some(mine), Some(theirs)) => !mine.is_empty() && mine == theirs,
            _ => false,
        }
    }
}

/// Parameters for inserting a new user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub department: Option<String>,
    pub admin: bool,
}
