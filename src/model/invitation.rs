use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InvitationDto {
    pub id: i32,
    pub organization_id: i32,
    pub code: String,
    pub created_by: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_uses: Option<i32>,
    pub use_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateInvitationDto {
    /// Hours until the code stops working; omitted for no expiry.
    pub expires_in_hours: Option<i64>,
    /// Number of times the code can be redeemed; omitted for unlimited.
    pub max_uses: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JoinInvitationDto {
    #[serde(default)]
    pub code: String,
}
