//! Domain & parameter models for chat rooms, messages and room events.

use chrono::{DateTime, Utc};

use crate::{
    model::chat::{
        ChatEventDto, ChatMemberDto, ChatRoomDto, CreateChatRoomDto, CreateMessageDto,
        MessageAuthorDto, MessageDto, RoomKind,
    },
    server::{error::AppError, model::parse_stored},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRoom {
    pub id: i32,
    pub kind: RoomKind,
    pub name: Option<String>,
    pub organization_id: Option<i32>,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}

impl ChatRoom {
    pub fn from_entity(entity: entity::chat_room::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            kind: parse_stored("chat_room.kind", entity.kind, RoomKind::parse)?,
            name: entity.name,
            organization_id: entity.organization_id,
            created_by: entity.created_by,
            created_at: entity.created_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMember {
    pub user_id: i32,
    pub name: String,
    pub last_read_message_id: Option<i32>,
}

impl ChatMember {
    pub fn into_dto(self) -> ChatMemberDto {
        ChatMemberDto {
            user_id: self.user_id,
            name: self.name,
        }
    }
}

/// A room together with its members and the caller's unread count.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRoomSummary {
    pub room: ChatRoom,
    pub members: Vec<ChatMember>,
    pub unread_count: u64,
}

impl ChatRoomSummary {
    pub fn into_dto(self) -> ChatRoomDto {
        ChatRoomDto {
            id: self.room.id,
            kind: self.room.kind,
            name: self.room.name,
            organization_id: self.room.organization_id,
            created_by: self.room.created_by,
            members: self.members.into_iter().map(|m| m.into_dto()).collect(),
            unread_count: self.unread_count,
            created_at: self.room.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateChatRoomParams {
    pub kind: RoomKind,
    pub name: Option<String>,
    pub organization_id: Option<i32>,
    pub created_by: i32,
    /// Every member including the creator, without duplicates.
    pub member_ids: Vec<i32>,
}

impl CreateChatRoomParams {
    pub fn from_dto(created_by: i32, dto: CreateChatRoomDto) -> Self {
        let mut member_ids = vec![created_by];
        for id in dto.member_ids {
            if !member_ids.contains(&id) {
                member_ids.push(id);
            }
        }

        Self {
            kind: dto.kind,
            name: dto
                .name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            organization_id: dto.organization_id,
            created_by,
            member_ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: i32,
    pub room_id: i32,
    pub author_id: i32,
    pub author_name: String,
    pub content: String,
    pub attachment_url: Option<String>,
    pub client_token: Option<String>,
    pub edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Message {
    pub fn from_entity(entity: entity::message::Model, author: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            room_id: entity.room_id,
            author_id: entity.user_id,
            author_name: author.name,
            content: entity.content,
            attachment_url: entity.attachment_url,
            client_token: entity.client_token,
            edited: entity.edited,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> MessageDto {
        MessageDto {
            id: self.id,
            room_id: self.room_id,
            author: MessageAuthorDto {
                id: self.author_id,
                name: self.author_name,
            },
            content: self.content,
            attachment_url: self.attachment_url,
            client_token: self.client_token,
            edited: self.edited,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateMessageParams {
    pub room_id: i32,
    pub user_id: i32,
    pub content: String,
    pub attachment_url: Option<String>,
    pub client_token: Option<String>,
}

impl CreateMessageParams {
    pub fn from_dto(room_id: i32, user_id: i32, dto: CreateMessageDto) -> Self {
        Self {
            room_id,
            user_id,
            content: dto.content.trim().to_string(),
            attachment_url: dto.attachment_url.filter(|u| !u.trim().is_empty()),
            client_token: dto.client_token.filter(|t| !t.is_empty()),
        }
    }
}

/// Newest-first page of a room's history.
#[derive(Debug, Clone, Copy)]
pub struct MessageCursor {
    /// Only messages with a smaller id are returned.
    pub before: Option<i32>,
    pub limit: u64,
}

/// Event fanned out to a room's subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    MessageCreated(Message),
    MessageUpdated(Message),
    MessageDeleted { room_id: i32, message_id: i32 },
}

impl ChatEvent {
    pub fn room_id(&self) -> i32 {
        match self {
            Self::MessageCreated(message) | Self::MessageUpdated(message) => message.room_id,
            Self::MessageDeleted { room_id, .. } => *room_id,
        }
    }

    pub fn into_dto(self) -> ChatEventDto {
        match self {
            Self::MessageCreated(message) => ChatEventDto::MessageCreated {
                message: message.into_dto(),
            },
            Self::MessageUpdated(message) => ChatEventDto::MessageUpdated {
                message: message.into_dto(),
            },
            Self::MessageDeleted {
                room_id,
                message_id,
            } => ChatEventDto::MessageDeleted {
                room_id,
                message_id,
            },
        }
    }
}

/// Request to move a member's read marker forward, handled off the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadReceipt {
    pub room_id: i32,
    pub user_id: i32,
    pub message_id: i32,
}
