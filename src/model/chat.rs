use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    Direct,
    Group,
}

impl RoomKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Group => "group",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "direct" => Some(Self::Direct),
            "group" => Some(Self::Group),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatMemberDto {
    pub user_id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatRoomDto {
    pub id: i32,
    pub kind: RoomKind,
    pub name: Option<String>,
    pub organization_id: Option<i32>,
    pub created_by: i32,
    pub members: Vec<ChatMemberDto>,
    /// Messages from other members after the caller's last read message.
    pub unread_count: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateChatRoomDto {
    pub kind: RoomKind,
    pub name: Option<String>,
    pub organization_id: Option<i32>,
    /// Other members of the room; exactly one for direct rooms.
    #[serde(default)]
    pub member_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddRoomMemberDto {
    pub user_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageAuthorDto {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub id: i32,
    pub room_id: i32,
    pub author: MessageAuthorDto,
    pub content: String,
    pub attachment_url: Option<String>,
    pub client_token: Option<String>,
    pub edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateMessageDto {
    #[serde(default)]
    pub content: String,
    pub attachment_url: Option<String>,
    /// Client-generated key; resending with the same key returns the stored message.
    pub client_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateMessageDto {
    #[serde(default)]
    pub content: String,
}

/// Event pushed to the subscribers of a chat room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEventDto {
    MessageCreated { message: MessageDto },
    MessageUpdated { message: MessageDto },
    MessageDeleted { room_id: i32, message_id: i32 },
}
