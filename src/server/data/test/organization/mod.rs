use crate::{
    model::organization::MemberRole,
    server::{
        data::organization::OrganizationRepository,
        model::organization::{CreateOrganizationParams, UpdateOrganizationParams},
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod members;
mod update;
