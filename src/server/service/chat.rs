//! Chat rooms, messages and their live fan-out.

pub mod hub;

use sea_orm::DatabaseConnection;

use crate::{
    model::chat::RoomKind,
    server::{
        data::{chat_room::ChatRoomRepository, message::MessageRepository},
        error::{auth::AuthError, AppError},
        model::chat::{
            ChatEvent, ChatMember, ChatRoom, ChatRoomSummary, CreateChatRoomParams,
            CreateMessageParams, Message, MessageCursor, ReadReceipt,
        },
        service::{organization::OrganizationService, user::UserService},
        worker::read_receipt::ReadReceiptQueue,
    },
};

use self::hub::ChatHub;

/// Page size used when the client does not ask for one.
pub const DEFAULT_MESSAGE_LIMIT: u64 = 50;
/// Largest page of messages returned at once.
pub const MAX_MESSAGE_LIMIT: u64 = 100;

pub struct ChatService<'a> {
    db: &'a DatabaseConnection,
    hub: &'a ChatHub,
}

impl<'a> ChatService<'a> {
    pub fn new(db: &'a DatabaseConnection, hub: &'a ChatHub) -> Self {
        Self { db, hub }
    }

    /// Creates a room. Direct rooms between the same pair are reused.
    ///
    /// # Returns
    /// - `Ok((room, true))` - Room created
    /// - `Ok((room, false))` - Existing direct room returned
    /// - `Err(AppError::Validation)` - Self-DM, wrong direct member count or unnamed group
    /// - `Err(AppError::NotFound)` - A listed member does not exist
    pub async fn create_room(
        &self,
        params: CreateChatRoomParams,
    ) -> Result<(ChatRoomSummary, bool), AppError> {
        let creator = params.created_by;
        let others: Vec<i32> = params
            .member_ids
            .iter()
            .copied()
            .filter(|id| *id != creator)
            .collect();

        match params.kind {
            RoomKind::Direct => {
                let [other] = others.as_slice() else {
                    return Err(if others.is_empty() {
                        AppError::validation("Cannot start a direct conversation with yourself")
                    } else {
                        AppError::validation("Direct rooms need exactly one other member")
                    });
                };

                UserService::new(self.db).ensure_exist(&[*other]).await?;

                let repo = ChatRoomRepository::new(self.db);
                if let Some(room) = repo.find_direct_between(creator, *other).await? {
                    let summary = self.summarize(room, creator).await?;
                    return Ok((summary, false));
                }
            }
            RoomKind::Group => {
                if params.name.is_none() {
                    return Err(AppError::validation("Group rooms need a name"));
                }

                UserService::new(self.db).ensure_exist(&others).await?;

                if let Some(organization_id) = params.organization_id {
                    OrganizationService::new(self.db)
                        .ensure_member(organization_id, creator)
                        .await?;
                }
            }
        }

        let room = ChatRoomRepository::new(self.db).create(params).await?;
        let summary = self.summarize(room, creator).await?;

        Ok((summary, true))
    }

    /// Rooms the user belongs to, with unread counts.
    pub async fn get_rooms(&self, user_id: i32) -> Result<Vec<ChatRoomSummary>, AppError> {
        let rooms = ChatRoomRepository::new(self.db).get_for_user(user_id).await?;

        let mut summaries = Vec::with_capacity(rooms.len());
        for room in rooms {
            summaries.push(self.summarize(room, user_id).await?);
        }

        Ok(summaries)
    }

    pub async fn get_room(&self, room_id: i32, user_id: i32) -> Result<ChatRoomSummary, AppError> {
        let room = self.find_room(room_id).await?;

        self.summarize(room, user_id).await
    }

    /// Adds a user to a group room.
    pub async fn add_member(
        &self,
        room_id: i32,
        user_id: i32,
        requested_by: i32,
    ) -> Result<ChatRoomSummary, AppError> {
        let room = self.find_room(room_id).await?;
        let kind = ChatRoom::from_entity(room.clone())?.kind;

        if kind == RoomKind::Direct {
            return Err(AppError::validation(
                "Members cannot be added to a direct room",
            ));
        }

        UserService::new(self.db).ensure_exist(&[user_id]).await?;

        let repo = ChatRoomRepository::new(self.db);
        if repo.is_member(room_id, user_id).await? {
            return Err(AppError::validation("Already a member"));
        }
        repo.add_member(room_id, user_id).await?;

        self.summarize(room, requested_by).await
    }

    /// Queues moving the user's read marker to the room's latest message.
    pub async fn mark_read(
        &self,
        room_id: i32,
        user_id: i32,
        queue: &ReadReceiptQueue,
    ) -> Result<(), AppError> {
        if let Some(message_id) = MessageRepository::new(self.db).latest_id(room_id).await? {
            queue.enqueue(ReadReceipt {
                room_id,
                user_id,
                message_id,
            });
        }

        Ok(())
    }

    /// Newest-first page of messages; `limit` is clamped to `1..=100`.
    pub async fn get_messages(
        &self,
        room_id: i32,
        before: Option<i32>,
        limit: Option<u64>,
    ) -> Result<Vec<Message>, AppError> {
        let limit = limit
            .unwrap_or(DEFAULT_MESSAGE_LIMIT)
            .clamp(1, MAX_MESSAGE_LIMIT);

        Ok(MessageRepository::new(self.db)
            .get_page(room_id, MessageCursor { before, limit })
            .await?)
    }

    /// Stores a message and broadcasts it to the room.
    ///
    /// A repeated client token returns the stored message without a second broadcast, including
    /// when two sends with the same token race past the lookup.
    ///
    /// # Returns
    /// - `Ok((message, true))` - New message stored and published
    /// - `Ok((message, false))` - Duplicate send
    pub async fn send_message(
        &self,
        params: CreateMessageParams,
    ) -> Result<(Message, bool), AppError> {
        if params.content.is_empty() && params.attachment_url.is_none() {
            return Err(AppError::validation("Message content is required"));
        }

        let repo = MessageRepository::new(self.db);

        if let Some(token) = params.client_token.as_deref() {
            if let Some(existing) = repo
                .find_by_client_token(params.room_id, params.user_id, token)
                .await?
            {
                return Ok((existing, false));
            }
        }

        let (message, created) = repo.create_once(params).await?;
        if created {
            self.hub
                .publish(ChatEvent::MessageCreated(message.clone()))
                .await;
        }

        Ok((message, created))
    }

    /// Replaces a message's content. Only the author may edit.
    pub async fn edit_message(
        &self,
        room_id: i32,
        message_id: i32,
        user_id: i32,
        content: String,
    ) -> Result<Message, AppError> {
        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(AppError::validation("Message content is required"));
        }

        let repo = MessageRepository::new(self.db);
        self.find_own_message(&repo, room_id, message_id, user_id)
            .await?;

        let message = repo
            .update_content(message_id, content)
            .await?
            .ok_or_else(|| AppError::not_found("Message"))?;

        self.hub
            .publish(ChatEvent::MessageUpdated(message.clone()))
            .await;

        Ok(message)
    }

    /// Deletes a message. Only the author may delete.
    pub async fn delete_message(
        &self,
        room_id: i32,
        message_id: i32,
        user_id: i32,
    ) -> Result<(), AppError> {
        let repo = MessageRepository::new(self.db);
        self.find_own_message(&repo, room_id, message_id, user_id)
            .await?;

        repo.delete(message_id).await?;

        self.hub
            .publish(ChatEvent::MessageDeleted {
                room_id,
                message_id,
            })
            .await;

        Ok(())
    }

    async fn find_own_message(
        &self,
        repo: &MessageRepository<'_>,
        room_id: i32,
        message_id: i32,
        user_id: i32,
    ) -> Result<Message, AppError> {
        let message = repo
            .find_by_id(message_id)
            .await?
            .filter(|m| m.room_id == room_id)
            .ok_or_else(|| AppError::not_found("Message"))?;

        if message.author_id != user_id {
            return Err(AuthError::AccessDenied(
                user_id,
                format!("only the author can change message {}", message_id),
            )
            .into());
        }

        Ok(message)
    }

    async fn find_room(&self, room_id: i32) -> Result<entity::chat_room::Model, AppError> {
        ChatRoomRepository::new(self.db)
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| AppError::not_found("Chat room"))
    }

    async fn summarize(
        &self,
        room: entity::chat_room::Model,
        user_id: i32,
    ) -> Result<ChatRoomSummary, AppError> {
        let repo = ChatRoomRepository::new(self.db);

        let members: Vec<ChatMember> = repo
            .get_members(room.id)
            .await?
            .into_iter()
            .map(|(member, user)| ChatMember {
                user_id: member.user_id,
                name: user.name,
                last_read_message_id: member.last_read_message_id,
            })
            .collect();

        let unread_count = match members.iter().find(|m| m.user_id == user_id) {
            Some(me) => {
                repo.count_unread(room.id, user_id, me.last_read_message_id)
                    .await?
            }
            None => 0,
        };

        Ok(ChatRoomSummary {
            room: ChatRoom::from_entity(room)?,
            members,
            unread_count,
        })
    }
}
