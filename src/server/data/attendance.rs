use chrono::NaiveDate;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::{
    model::attendance::AttendanceStatus,
    server::model::attendance::{CheckInParams, RecordTimesParams},
};

pub struct AttendanceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AttendanceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts the day's record at check-in with zero hours.
    pub async fn create_check_in(
        &self,
        params: CheckInParams,
    ) -> Result<entity::attendance::Model, DbErr> {
        entity::attendance::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            date: ActiveValue::Set(params.date),
            check_in_at: ActiveValue::Set(Some(params.check_in_at)),
            check_out_at: ActiveValue::Set(None),
            status: ActiveValue::Set(params.status.as_str().to_string()),
            work_hours: ActiveValue::Set(0.0),
            overtime_hours: ActiveValue::Set(0.0),
            note: ActiveValue::Set(params.note),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::attendance::Model>, DbErr> {
        entity::prelude::Attendance::find_by_id(id).one(self.db).await
    }

    pub async fn find_by_user_and_date(
        &self,
        user_id: i32,
        date: NaiveDate,
    ) -> Result<Option<entity::attendance::Model>, DbErr> {
        entity::prelude::Attendance::find()
            .filter(entity::attendance::Column::UserId.eq(user_id))
            .filter(entity::attendance::Column::Date.eq(date))
            .one(self.db)
            .await
    }

    /// The user's records dated within `from..=to`, oldest first.
    pub async fn get_range(
        &self,
        user_id: i32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<entity::attendance::Model>, DbErr> {
        entity::prelude::Attendance::find()
            .filter(entity::attendance::Column::UserId.eq(user_id))
            .filter(entity::attendance::Column::Date.gte(from))
            .filter(entity::attendance::Column::Date.lte(to))
            .order_by_asc(entity::attendance::Column::Date)
            .all(self.db)
            .await
    }

    /// Writes check-in/check-out times with the derived status and hours.
    pub async fn update_times(
        &self,
        params: RecordTimesParams,
    ) -> Result<Option<entity::attendance::Model>, DbErr> {
        let Some(record) = self.find_by_id(params.id).await? else {
            return Ok(None);
        };

        let mut active = record.into_active_model();
        active.check_in_at = ActiveValue::Set(Some(params.check_in_at));
        active.check_out_at = ActiveValue::Set(params.check_out_at);
        active.status = ActiveValue::Set(params.status.as_str().to_string());
        active.work_hours = ActiveValue::Set(params.work_hours);
        active.overtime_hours = ActiveValue::Set(params.overtime_hours);
        active.note = ActiveValue::Set(params.note);

        Ok(Some(active.update(self.db).await?))
    }

    /// Flags records dated before `today` that were never checked out.
    ///
    /// # Returns
    /// - `Ok(count)` - Number of records flagged
    pub async fn mark_missing_checkouts(&self, today: NaiveDate) -> Result<u64, DbErr> {
        let result = entity::prelude::Attendance::update_many()
            .col_expr(
                entity::attendance::Column::Status,
                Expr::value(AttendanceStatus::MissingCheckout.as_str()),
            )
            .filter(entity::attendance::Column::Date.lt(today))
            .filter(entity::attendance::Column::CheckInAt.is_not_null())
            .filter(entity::attendance::Column::CheckOutAt.is_null())
            .filter(
                entity::attendance::Column::Status.ne(AttendanceStatus::MissingCheckout.as_str()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
