//! Attendance records, the work-day policy and period aggregation.
//!
//! Hours and status are derived here from check-in/check-out instants so the service,
//! the manual correction path and the scheduler all apply the same rules.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};

use crate::{
    model::attendance::{
        AttendanceBucketDto, AttendanceDto, AttendanceStatus, AttendanceSummaryDto, SummaryPeriod,
    },
    server::{error::AppError, model::parse_stored},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Attendance {
    pub id: i32,
    pub user_id: i32,
    pub date: NaiveDate,
    pub check_in_at: Option<DateTime<Utc>>,
    pub check_out_at: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    pub work_hours: f64,
    pub overtime_hours: f64,
    pub note: Option<String>,
}

impl Attendance {
    pub fn from_entity(entity: entity::attendance::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            date: entity.date,
            check_in_at: entity.check_in_at,
            check_out_at: entity.check_out_at,
            status: parse_stored("attendance.status", entity.status, AttendanceStatus::parse)?,
            work_hours: entity.work_hours,
            overtime_hours: entity.overtime_hours,
            note: entity.note,
        })
    }

    pub fn into_dto(self) -> AttendanceDto {
        AttendanceDto {
            id: self.id,
            user_id: self.user_id,
            date: self.date,
            check_in_at: self.check_in_at,
            check_out_at: self.check_out_at,
            status: self.status,
            work_hours: self.work_hours,
            overtime_hours: self.overtime_hours,
            note: self.note,
        }
    }

    /// Checked in without a check-out yet.
    pub fn is_open(&self) -> bool {
        self.check_in_at.is_some() && self.check_out_at.is_none()
    }
}

/// Work-day rules configured through `WORK_DAY_START` and `STANDARD_WORK_HOURS`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttendancePolicy {
    pub work_day_start: NaiveTime,
    pub standard_work_hours: f64,
}

impl AttendancePolicy {
    /// `late` when checking in after the start of the work day (UTC time of day).
    pub fn status_for_check_in(&self, check_in_at: DateTime<Utc>) -> AttendanceStatus {
        if check_in_at.time() > self.work_day_start {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        }
    }

    /// Returns `(work_hours, overtime_hours)` rounded to two decimals.
    ///
    /// Callers reject a check-out before the check-in; a negative span yields zero.
    pub fn hours(&self, check_in_at: DateTime<Utc>, check_out_at: DateTime<Utc>) -> (f64, f64) {
        let seconds = (check_out_at - check_in_at).num_seconds().max(0);
        let work_hours = round_hours(seconds as f64 / 3600.0);
        let overtime_hours = round_hours((work_hours - self.standard_work_hours).max(0.0));
        (work_hours, overtime_hours)
    }
}

fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

#[derive(Debug, Clone)]
pub struct CheckInParams {
    pub user_id: i32,
    pub date: NaiveDate,
    pub check_in_at: DateTime<Utc>,
    pub status: AttendanceStatus,
    pub note: Option<String>,
}

/// Values written when a record is closed or corrected.
#[derive(Debug, Clone)]
pub struct RecordTimesParams {
    pub id: i32,
    pub check_in_at: DateTime<Utc>,
    pub check_out_at: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    pub work_hours: f64,
    pub overtime_hours: f64,
    pub note: Option<String>,
}

/// First day of the bucket containing `date`.
pub fn period_start(date: NaiveDate, period: SummaryPeriod) -> NaiveDate {
    match period {
        SummaryPeriod::Day => date,
        SummaryPeriod::Week => {
            date - Days::new(u64::from(date.weekday().num_days_from_monday()))
        }
        SummaryPeriod::Month => date.with_day(1).unwrap_or(date),
    }
}

/// Last day of the bucket starting at `start`.
pub fn period_end(start: NaiveDate, period: SummaryPeriod) -> NaiveDate {
    match period {
        SummaryPeriod::Day => start,
        SummaryPeriod::Week => start + Days::new(6),
        SummaryPeriod::Month => (start + Months::new(1))
            .pred_opt()
            .unwrap_or(start),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceBucket {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_work_hours: f64,
    pub total_overtime_hours: f64,
    pub present_days: u32,
    pub late_days: u32,
    pub missing_checkout_days: u32,
    pub records: u32,
}

impl AttendanceBucket {
    fn new(period_start: NaiveDate, period: SummaryPeriod) -> Self {
        Self {
            period_start,
            period_end: period_end(period_start, period),
            total_work_hours: 0.0,
            total_overtime_hours: 0.0,
            present_days: 0,
            late_days: 0,
            missing_checkout_days: 0,
            records: 0,
        }
    }

    fn add(&mut self, record: &Attendance) {
        self.total_work_hours = round_hours(self.total_work_hours + record.work_hours);
        self.total_overtime_hours = round_hours(self.total_overtime_hours + record.overtime_hours);
        match record.status {
            AttendanceStatus::Present => self.present_days += 1,
            AttendanceStatus::Late => self.late_days += 1,
            AttendanceStatus::MissingCheckout => self.missing_checkout_days += 1,
        }
        self.records += 1;
    }

    pub fn into_dto(self) -> AttendanceBucketDto {
        AttendanceBucketDto {
            period_start: self.period_start,
            period_end: self.period_end,
            total_work_hours: self.total_work_hours,
            total_overtime_hours: self.total_overtime_hours,
            present_days: self.present_days,
            late_days: self.late_days,
            missing_checkout_days: self.missing_checkout_days,
            records: self.records,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub period: SummaryPeriod,
    pub buckets: Vec<AttendanceBucket>,
    pub total_work_hours: f64,
    pub total_overtime_hours: f64,
}

impl AttendanceSummary {
    /// Groups records dated within `from..=to` into period buckets ordered by start date.
    ///
    /// Only periods with at least one record produce a bucket.
    pub fn build(
        records: &[Attendance],
        from: NaiveDate,
        to: NaiveDate,
        period: SummaryPeriod,
    ) -> Self {
        let mut buckets: Vec<AttendanceBucket> = Vec::new();

        let mut in_range: Vec<&Attendance> = records
            .iter()
            .filter(|r| r.date >= from && r.date <= to)
            .collect();
        in_range.sort_by_key(|r| r.date);

        for record in in_range {
            let start = period_start(record.date, period);
            match buckets.last_mut() {
                Some(bucket) if bucket.period_start == start => bucket.add(record),
                _ => {
                    let mut bucket = AttendanceBucket::new(start, period);
                    bucket.add(record);
                    buckets.push(bucket);
                }
            }
        }

        let total_work_hours = round_hours(buckets.iter().map(|b| b.total_work_hours).sum());
        let total_overtime_hours =
            round_hours(buckets.iter().map(|b| b.total_overtime_hours).sum());

        Self {
            from,
            to,
            period,
            buckets,
            total_work_hours,
            total_overtime_hours,
        }
    }

    pub fn into_dto(self) -> AttendanceSummaryDto {
        AttendanceSummaryDto {
            from: self.from,
            to: self.to,
            period: self.period,
            buckets: self.buckets.into_iter().map(|b| b.into_dto()).collect(),
            total_work_hours: self.total_work_hours,
            total_overtime_hours: self.total_overtime_hours,
        }
    }
}
