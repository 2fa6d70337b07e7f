pub use super::attendance::Entity as Attendance;
pub use super::chat_room::Entity as ChatRoom;
pub use super::chat_room_member::Entity as ChatRoomMember;
pub use super::invitation::Entity as Invitation;
pub use super::manual::Entity as Manual;
pub use super::meeting::Entity as Meeting;
pub use super::meeting_participant::Entity as MeetingParticipant;
pub use super::message::Entity as Message;
pub use super::organization::Entity as Organization;
pub use super::organization_member::Entity as OrganizationMember;
pub use super::task::Entity as Task;
pub use super::task_tag::Entity as TaskTag;
pub use super::user::Entity as User;
