use axum::{
    extract::{
        ws::{
            rejection::WebSocketUpgradeRejection, Message as WsMessage, WebSocket,
            WebSocketUpgrade,
        },
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        chat::{
            AddRoomMemberDto, ChatEventDto, ChatRoomDto, CreateChatRoomDto, CreateMessageDto,
            MessageDto, UpdateMessageDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::chat::{ChatEvent, CreateChatRoomParams, CreateMessageParams},
        service::chat::{hub::ChatHub, ChatService},
        state::AppState,
        util::extract::{ValidJson, ValidQuery},
    },
};

/// Tag for grouping chat endpoints in OpenAPI documentation
pub static CHAT_TAG: &str = "chat";

#[derive(Deserialize)]
pub struct MessageListParams {
    pub before: Option<i32>,
    pub limit: Option<u64>,
}

/// Create a chat room.
///
/// Direct rooms take exactly one other member in `member_ids`. Asking for a direct room that
/// already exists between the two users returns it with `200 OK` instead of creating a copy.
///
/// # Returns
/// - `201 Created` - New room
/// - `200 OK` - Existing direct room
/// - `404 Not Found` - A listed member does not exist
/// - `422 Unprocessable Entity` - Invalid member list or missing group name
#[utoipa::path(
    post,
    path = "/api/chat_rooms",
    tag = CHAT_TAG,
    request_body = CreateChatRoomDto,
    responses(
        (status = 201, description = "Room created", body = ChatRoomDto),
        (status = 200, description = "Existing direct room", body = ChatRoomDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Member not found", body = ErrorDto),
        (status = 422, description = "Invalid room", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_room(
    State(state): State<AppState>,
    session: Session,
    ValidJson(payload): ValidJson<CreateChatRoomDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let (room, created) = ChatService::new(&state.db, &state.chat_hub)
        .create_room(CreateChatRoomParams::from_dto(user.id, payload))
        .await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(room.into_dto())))
}

/// List the user's rooms with unread counts.
#[utoipa::path(
    get,
    path = "/api/chat_rooms",
    tag = CHAT_TAG,
    responses(
        (status = 200, description = "Rooms of the user", body = Vec<ChatRoomDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_rooms(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let rooms = ChatService::new(&state.db, &state.chat_hub)
        .get_rooms(user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(rooms.into_iter().map(|r| r.into_dto()).collect::<Vec<_>>()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/chat_rooms/{id}",
    tag = CHAT_TAG,
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room", body = ChatRoomDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a room member", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_room(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ChatRoomMember(id)])
        .await?;

    let room = ChatService::new(&state.db, &state.chat_hub)
        .get_room(id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(room.into_dto())))
}

/// Add a user to a group room. Any member may invite others.
#[utoipa::path(
    post,
    path = "/api/chat_rooms/{id}/members",
    tag = CHAT_TAG,
    params(("id" = i32, Path, description = "Room ID")),
    request_body = AddRoomMemberDto,
    responses(
        (status = 200, description = "Member added", body = ChatRoomDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a room member", body = ErrorDto),
        (status = 404, description = "Room or user not found", body = ErrorDto),
        (status = 422, description = "Direct room or already a member", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_member(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ValidJson(payload): ValidJson<AddRoomMemberDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ChatRoomMember(id)])
        .await?;

    let room = ChatService::new(&state.db, &state.chat_hub)
        .add_member(id, payload.user_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(room.into_dto())))
}

/// Mark the room as read up to its latest message.
///
/// The marker is written in the background, so the response is `202 Accepted`.
#[utoipa::path(
    post,
    path = "/api/chat_rooms/{id}/read",
    tag = CHAT_TAG,
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 202, description = "Read marker queued"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a room member", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_read(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ChatRoomMember(id)])
        .await?;

    ChatService::new(&state.db, &state.chat_hub)
        .mark_read(id, user.id, &state.read_receipts)
        .await?;

    Ok(StatusCode::ACCEPTED)
}

/// Page through a room's history, newest first.
///
/// # Arguments
/// - `before` - Only messages with a smaller id
/// - `limit` - Page size (default: 50, max: 100)
#[utoipa::path(
    get,
    path = "/api/chat_rooms/{id}/messages",
    tag = CHAT_TAG,
    params(
        ("id" = i32, Path, description = "Room ID"),
        ("before" = Option<i32>, Query, description = "Return messages older than this id"),
        ("limit" = Option<u64>, Query, description = "Page size (default: 50, max: 100)")
    ),
    responses(
        (status = 200, description = "Messages, newest first", body = Vec<MessageDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a room member", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_messages(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ValidQuery(params): ValidQuery<MessageListParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ChatRoomMember(id)])
        .await?;

    let messages = ChatService::new(&state.db, &state.chat_hub)
        .get_messages(id, params.before, params.limit)
        .await?;

    Ok((
        StatusCode::OK,
        Json(messages.into_iter().map(|m| m.into_dto()).collect::<Vec<_>>()),
    ))
}

/// Post a message and broadcast it to the room's live subscribers.
///
/// Resending with the same `client_token` returns the stored message with `200 OK` and does
/// not broadcast again.
#[utoipa::path(
    post,
    path = "/api/chat_rooms/{id}/messages",
    tag = CHAT_TAG,
    params(("id" = i32, Path, description = "Room ID")),
    request_body = CreateMessageDto,
    responses(
        (status = 201, description = "Message sent", body = MessageDto),
        (status = 200, description = "Duplicate send, stored message returned", body = MessageDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a room member", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 422, description = "Empty message", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_message(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ValidJson(payload): ValidJson<CreateMessageDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ChatRoomMember(id)])
        .await?;

    let (message, created) = ChatService::new(&state.db, &state.chat_hub)
        .send_message(CreateMessageParams::from_dto(id, user.id, payload))
        .await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(message.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/chat_rooms/{id}/messages/{message_id}",
    tag = CHAT_TAG,
    params(
        ("id" = i32, Path, description = "Room ID"),
        ("message_id" = i32, Path, description = "Message ID")
    ),
    request_body = UpdateMessageDto,
    responses(
        (status = 200, description = "Message edited", body = MessageDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the author", body = ErrorDto),
        (status = 404, description = "Room or message not found", body = ErrorDto),
        (status = 422, description = "Empty message", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_message(
    State(state): State<AppState>,
    session: Session,
    Path((id, message_id)): Path<(i32, i32)>,
    ValidJson(payload): ValidJson<UpdateMessageDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ChatRoomMember(id)])
        .await?;

    let message = ChatService::new(&state.db, &state.chat_hub)
        .edit_message(id, message_id, user.id, payload.content)
        .await?;

    Ok((StatusCode::OK, Json(message.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/chat_rooms/{id}/messages/{message_id}",
    tag = CHAT_TAG,
    params(
        ("id" = i32, Path, description = "Room ID"),
        ("message_id" = i32, Path, description = "Message ID")
    ),
    responses(
        (status = 204, description = "Message deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the author", body = ErrorDto),
        (status = 404, description = "Room or message not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_message(
    State(state): State<AppState>,
    session: Session,
    Path((id, message_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ChatRoomMember(id)])
        .await?;

    ChatService::new(&state.db, &state.chat_hub)
        .delete_message(id, message_id, user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Subscribe to a room's live events over a WebSocket.
///
/// Each text frame is a JSON [`ChatEventDto`]. Frames sent by the client are ignored; posting
/// goes through the REST endpoint so that every message is persisted first.
#[utoipa::path(
    get,
    path = "/api/chat_rooms/{id}/ws",
    tag = CHAT_TAG,
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 101, description = "Switched to WebSocket, streams ChatEventDto frames", body = ChatEventDto),
        (status = 400, description = "Not a WebSocket upgrade request", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a room member", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn subscribe_room(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ChatRoomMember(id)])
        .await?;
    let ws = ws.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let events = state.chat_hub.subscribe(id).await;
    let hub = state.chat_hub.clone();

    tracing::debug!(room_id = id, user_id = user.id, "chat subscriber connected");

    Ok(ws.on_upgrade(move |socket| forward_events(socket, events, hub, id)))
}

async fn forward_events(
    mut socket: WebSocket,
    mut events: broadcast::Receiver<ChatEvent>,
    hub: ChatHub,
    room_id: i32,
) {
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let payload = match serde_json::to_string(&event.into_dto()) {
                        Ok(payload) => payload,
                        Err(e) => {
                            tracing::error!(room_id, "failed to encode chat event: {}", e);
                            continue;
                        }
                    };
                    if socket.send(WsMessage::Text(payload.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(room_id, skipped, "chat subscriber lagged behind");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(WsMessage::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    drop(events);
    hub.prune(room_id).await;
}
