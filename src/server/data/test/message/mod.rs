use crate::server::{
    data::message::MessageRepository,
    model::chat::{CreateMessageParams, MessageCursor},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_page;
mod update_content;
