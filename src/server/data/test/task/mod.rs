use crate::{
    model::task::{TaskPriority, TaskStatus},
    server::{
        data::task::TaskRepository,
        model::task::{CreateTaskParams, TaskFilter, UpdateTaskParams},
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_visible_paginated;
mod update;

fn tag_names(tags: &[entity::task_tag::Model]) -> Vec<String> {
    let mut names: Vec<String> = tags.iter().map(|t| t.name.clone()).collect();
    names.sort();
    names
}
