use crate::{
    model::chat::RoomKind,
    server::{data::chat_room::ChatRoomRepository, model::chat::CreateChatRoomParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod count_unread;
mod create;
mod find_direct_between;
mod mark_read;
