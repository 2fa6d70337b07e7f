use crate::server::{
    data::meeting::MeetingRepository,
    model::meeting::{CreateMeetingParams, UpdateMeetingParams},
};
use chrono::{Duration, TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_for_user;
mod update;
