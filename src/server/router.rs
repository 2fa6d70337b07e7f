use axum::{
    routing::{get, post, put},
    Json, Router,
};
use utoipa::OpenApi;

use crate::server::{
    controller::{
        attendance::{self, ATTENDANCE_TAG},
        auth::{self, AUTH_TAG},
        chat::{self, CHAT_TAG},
        invitation::{self, INVITATION_TAG},
        manual::{self, MANUAL_TAG},
        meeting::{self, MEETING_TAG},
        organization::{self, ORGANIZATION_TAG},
        task::{self, TASK_TAG},
        user::{self, USER_TAG},
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Workdesk API", description = "Team workspace: tasks, chat, manuals, attendance and meetings"),
    tags(
        (name = AUTH_TAG, description = "Registration and session login"),
        (name = USER_TAG, description = "User directory"),
        (name = ORGANIZATION_TAG, description = "Organizations and their members"),
        (name = INVITATION_TAG, description = "Organization invitation codes"),
        (name = TASK_TAG, description = "Personal and shared tasks"),
        (name = CHAT_TAG, description = "Chat rooms, messages and live events"),
        (name = MANUAL_TAG, description = "Work manuals"),
        (name = ATTENDANCE_TAG, description = "Check-in, check-out and summaries"),
        (name = MEETING_TAG, description = "Meeting scheduling")
    ),
    paths(
        auth::register,
        auth::login,
        auth::logout,
        auth::get_user,
        user::get_users,
        organization::create_organization,
        organization::get_organizations,
        organization::get_organization,
        organization::update_organization,
        organization::delete_organization,
        organization::get_members,
        organization::update_member_role,
        organization::remove_member,
        organization::leave_organization,
        invitation::create_invitation,
        invitation::get_invitations,
        invitation::delete_invitation,
        invitation::join_organization,
        task::create_task,
        task::get_tasks,
        task::get_task,
        task::update_task,
        task::delete_task,
        chat::create_room,
        chat::get_rooms,
        chat::get_room,
        chat::add_member,
        chat::mark_read,
        chat::get_messages,
        chat::send_message,
        chat::update_message,
        chat::delete_message,
        chat::subscribe_room,
        manual::create_manual,
        manual::get_manuals,
        manual::get_manual,
        manual::update_manual,
        manual::delete_manual,
        attendance::get_attendance,
        attendance::check_in,
        attendance::check_out,
        attendance::update_attendance,
        attendance::get_summary,
        meeting::create_meeting,
        meeting::get_meetings,
        meeting::get_meeting,
        meeting::update_meeting,
        meeting::delete_meeting,
    )
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/openapi.json", get(openapi))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/user", get(auth::get_user))
        .route("/api/users", get(user::get_users))
        .route(
            "/api/organizations",
            get(organization::get_organizations).post(organization::create_organization),
        )
        .route(
            "/api/organizations/{id}",
            get(organization::get_organization)
                .put(organization::update_organization)
                .delete(organization::delete_organization),
        )
        .route(
            "/api/organizations/{id}/members",
            get(organization::get_members),
        )
        .route(
            "/api/organizations/{id}/members/{user_id}",
            put(organization::update_member_role).delete(organization::remove_member),
        )
        .route(
            "/api/organizations/{id}/leave",
            post(organization::leave_organization),
        )
        .route(
            "/api/organizations/{id}/invitations",
            get(invitation::get_invitations).post(invitation::create_invitation),
        )
        .route(
            "/api/organizations/{id}/invitations/{invitation_id}",
            axum::routing::delete(invitation::delete_invitation),
        )
        .route("/api/invitations/join", post(invitation::join_organization))
        .route("/api/tasks", get(task::get_tasks).post(task::create_task))
        .route(
            "/api/tasks/{id}",
            get(task::get_task)
                .put(task::update_task)
                .patch(task::update_task)
                .delete(task::delete_task),
        )
        .route(
            "/api/chat_rooms",
            get(chat::get_rooms).post(chat::create_room),
        )
        .route("/api/chat_rooms/{id}", get(chat::get_room))
        .route("/api/chat_rooms/{id}/members", post(chat::add_member))
        .route("/api/chat_rooms/{id}/read", post(chat::mark_read))
        .route("/api/chat_rooms/{id}/ws", get(chat::subscribe_room))
        .route(
            "/api/chat_rooms/{id}/messages",
            get(chat::get_messages).post(chat::send_message),
        )
        .route(
            "/api/chat_rooms/{id}/messages/{message_id}",
            put(chat::update_message).delete(chat::delete_message),
        )
        .route(
            "/api/manuals",
            get(manual::get_manuals).post(manual::create_manual),
        )
        .route(
            "/api/manuals/{id}",
            get(manual::get_manual)
                .put(manual::update_manual)
                .delete(manual::delete_manual),
        )
        .route("/api/attendance", get(attendance::get_attendance))
        .route("/api/attendance/check_in", post(attendance::check_in))
        .route("/api/attendance/check_out", post(attendance::check_out))
        .route("/api/attendance/summary", get(attendance::get_summary))
        .route("/api/attendance/{id}", put(attendance::update_attendance))
        .route(
            "/api/meetings",
            get(meeting::get_meetings).post(meeting::create_meeting),
        )
        .route(
            "/api/meetings/{id}",
            get(meeting::get_meeting)
                .put(meeting::update_meeting)
                .delete(meeting::delete_meeting),
        )
}
