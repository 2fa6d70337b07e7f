use sea_orm::DatabaseConnection;

use crate::server::{
    data::manual::ManualRepository,
    error::{auth::AuthError, AppError},
    model::{
        manual::{CreateManualParams, Manual, ManualFilter, PaginatedManuals, UpdateManualParams},
        total_pages,
        user::User,
    },
    service::organization::OrganizationService,
};

pub struct ManualService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ManualService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateManualParams) -> Result<Manual, AppError> {
        if params.title.is_empty() {
            return Err(AppError::validation("Title is required"));
        }

        if let Some(organization_id) = params.organization_id {
            OrganizationService::new(self.db)
                .ensure_member(organization_id, params.user_id)
                .await?;
        }

        let manual = ManualRepository::new(self.db).create(params).await?;

        Manual::from_entity(manual)
    }

    /// Gets a manual the viewer may read. Hidden manuals answer 404.
    pub async fn get(&self, id: i32, viewer: &User) -> Result<Manual, AppError> {
        self.find_visible(id, viewer).await
    }

    pub async fn get_paginated(
        &self,
        viewer: &User,
        filter: ManualFilter,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedManuals, AppError> {
        let (manuals, total) = ManualRepository::new(self.db)
            .get_visible_paginated(viewer, &filter, page, per_page)
            .await?;

        let manuals: Result<Vec<_>, _> = manuals.into_iter().map(Manual::from_entity).collect();

        Ok(PaginatedManuals {
            manuals: manuals?,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    /// # Returns
    /// - `Err(AppError::NotFound)` - Missing or hidden from the viewer
    /// - `Err(AuthError::AccessDenied)` - Visible but not editable by the viewer, or a delegated
    ///   editor changing access level, edit permission or department
    pub async fn update(&self, params: UpdateManualParams, viewer: &User) -> Result<Manual, AppError> {
        if params.title.as_deref().is_some_and(str::is_empty) {
            return Err(AppError::validation("Title is required"));
        }

        let manual = self.find_visible(params.id, viewer).await?;
        if !manual.is_editable_by(viewer) {
            return Err(AuthError::AccessDenied(
                viewer.id,
                format!("no edit permission for manual {}", manual.id),
            )
            .into());
        }
        if params.changes_access_of(&manual) && !manual.access_is_managed_by(viewer) {
            return Err(AuthError::AccessDenied(
                viewer.id,
                format!("only the author can change access to manual {}", manual.id),
            )
            .into());
        }

        let updated = ManualRepository::new(self.db)
            .update(params)
            .await?
            .ok_or_else(|| AppError::not_found("Manual"))?;

        Manual::from_entity(updated)
    }

    /// Deletes a manual. Only its author or an admin may delete it.
    pub async fn delete(&self, id: i32, viewer: &User) -> Result<(), AppError> {
        let manual = self.find_visible(id, viewer).await?;
        if !manual.is_deletable_by(viewer) {
            return Err(AuthError::AccessDenied(
                viewer.id,
                format!("only the author can delete manual {}", id),
            )
            .into());
        }

        ManualRepository::new(self.db).delete(id).await?;

        Ok(())
    }

    async fn find_visible(&self, id: i32, viewer: &User) -> Result<Manual, AppError> {
        let manual = ManualRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Manual"))?;
        let manual = Manual::from_entity(manual)?;

        if !manual.is_visible_to(viewer) {
            return Err(AppError::not_found("Manual"));
        }

        Ok(manual)
    }
}
