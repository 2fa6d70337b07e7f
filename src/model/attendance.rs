use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Late,
    MissingCheckout,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Late => "late",
            Self::MissingCheckout => "missing_checkout",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "present" => Some(Self::Present),
            "late" => Some(Self::Late),
            "missing_checkout" => Some(Self::MissingCheckout),
            _ => None,
        }
    }
}

/// Bucket width used by the attendance summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SummaryPeriod {
    #[default]
    Day,
    Week,
    Month,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceDto {
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

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CheckInDto {
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateAttendanceDto {
    pub check_in_at: DateTime<Utc>,
    pub check_out_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceBucketDto {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_work_hours: f64,
    pub total_overtime_hours: f64,
    pub present_days: u32,
    pub late_days: u32,
    pub missing_checkout_days: u32,
    pub records: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceSummaryDto {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub period: SummaryPeriod,
    pub buckets: Vec<AttendanceBucketDto>,
    pub total_work_hours: f64,
    pub total_overtime_hours: f64,
}
