use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Who can read a manual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    #[default]
    Public,
    Department,
    Private,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Department => "department",
            Self::Private => "private",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "public" => Some(Self::Public),
            "department" => Some(Self::Department),
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

/// Who can change a manual, among those who can read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EditPermission {
    #[default]
    Author,
    Department,
    Everyone,
}

impl EditPermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Department => "department",
            Self::Everyone => "everyone",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "author" => Some(Self::Author),
            "department" => Some(Self::Department),
            "everyone" => Some(Self::Everyone),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ManualDto {
    pub id: i32,
    pub user_id: i32,
    pub organization_id: Option<i32>,
    pub title: String,
    pub content: String,
    pub department: Option<String>,
    pub category: Option<String>,
    pub access_level: AccessLevel,
    pub edit_permission: EditPermission,
    /// Whether the requesting user may update this manual.
    pub can_edit: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateManualDto {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub department: Option<String>,
    pub category: Option<String>,
    pub organization_id: Option<i32>,
    pub access_level: Option<AccessLevel>,
    pub edit_permission: Option<EditPermission>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateManualDto {
    pub title: Option<String>,
    pub content: Option<String>,
    pub department: Option<String>,
    pub category: Option<String>,
    pub access_level: Option<AccessLevel>,
    pub edit_permission: Option<EditPermission>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedManualsDto {
    pub manuals: Vec<ManualDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
