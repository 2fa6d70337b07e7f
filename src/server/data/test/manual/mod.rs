use crate::server::{
    data::manual::ManualRepository,
    model::{
        manual::{ManualFilter, UpdateManualParams},
        user::User,
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_visible_paginated;
mod update;
