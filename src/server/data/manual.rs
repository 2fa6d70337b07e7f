use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::manual::AccessLevel,
    server::model::{
        manual::{CreateManualParams, ManualFilter, UpdateManualParams},
        user::User,
    },
};

pub struct ManualRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ManualRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateManualParams) -> Result<entity::manual::Model, DbErr> {
        let now = Utc::now();

        entity::manual::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            organization_id: ActiveValue::Set(params.organization_id),
            title: ActiveValue::Set(params.title),
            content: ActiveValue::Set(params.content),
            department: ActiveValue::Set(params.department),
            category: ActiveValue::Set(params.category),
            access_level: ActiveValue::Set(params.access_level.as_str().to_string()),
            edit_permission: ActiveValue::Set(params.edit_permission.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::manual::Model>, DbErr> {
        entity::prelude::Manual::find_by_id(id).one(self.db).await
    }

    /// Gets a page of the manuals `viewer` may read, most recently updated first.
    ///
    /// Mirrors `Manual::is_visible_to` in SQL so pagination counts only visible rows.
    pub async fn get_visible_paginated(
        &self,
        viewer: &User,
        filter: &ManualFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<entity::manual::Model>, u64), DbErr> {
        let mut query = entity::prelude::Manual::find();

        if !viewer.admin {
            let mut visibility = Condition::any()
                .add(entity::manual::Column::UserId.eq(viewer.id))
                .add(entity::manual::Column::AccessLevel.eq(AccessLevel::Public.as_str()));

            if let Some(department) = viewer.department.as_deref().filter(|d| !d.is_empty()) {
                visibility = visibility.add(
                    Condition::all()
                        .add(
                            entity::manual::Column::AccessLevel
                                .eq(AccessLevel::Department.as_str()),
                        )
                        .add(entity::manual::Column::Department.eq(department)),
                );
            }

            query = query.filter(visibility);
        }

        if let Some(department) = &filter.department {
            query = query.filter(entity::manual::Column::Department.eq(department.as_str()));
        }
        if let Some(category) = &filter.category {
            query = query.filter(entity::manual::Column::Category.eq(category.as_str()));
        }
        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(entity::manual::Column::Title.contains(search));
        }

        let paginator = query
            .order_by_desc(entity::manual::Column::UpdatedAt)
            .order_by_desc(entity::manual::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let manuals = paginator.fetch_page(page).await?;

        Ok((manuals, total))
    }

    pub async fn update(
        &self,
        params: UpdateManualParams,
    ) -> Result<Option<entity::manual::Model>, DbErr> {
        let Some(manual) = self.find_by_id(params.id).await? else {
            return Ok(None);
        };

        let mut active = manual.into_active_model();
        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(content) = params.content {
            active.content = ActiveValue::Set(content);
        }
        if let Some(department) = params.department {
            active.department = ActiveValue::Set(department);
        }
        if let Some(category) = params.category {
            active.category = ActiveValue::Set(category);
        }
        if let Some(access_level) = params.access_level {
            active.access_level = ActiveValue::Set(access_level.as_str().to_string());
        }
        if let Some(edit_permission) = params.edit_permission {
            active.edit_permission = ActiveValue::Set(edit_permission.as_str().to_string());
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active.update(self.db).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Manual::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}
