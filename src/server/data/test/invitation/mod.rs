use crate::server::{
    data::invitation::InvitationRepository,
    model::invitation::{CreateInvitationParams, Redemption},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod redeem;
