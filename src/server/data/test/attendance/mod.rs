use crate::{
    model::attendance::AttendanceStatus,
    server::{
        data::attendance::AttendanceRepository,
        model::attendance::{CheckInParams, RecordTimesParams},
    },
};
use chrono::{NaiveDate, TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create_check_in;
mod get_range;
mod mark_missing_checkouts;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
