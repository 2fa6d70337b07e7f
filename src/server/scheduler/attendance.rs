use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError, model::attendance::AttendancePolicy,
    service::attendance::AttendanceService,
};

/// Top of every hour.
const MISSING_CHECKOUT_SCHEDULE: &str = "0 0 * * * *";

/// Starts the attendance scheduler.
///
/// Every hour, records from previous days that were checked in but never checked out are
/// flagged as `missing_checkout`.
pub async fn start_scheduler(
    db: DatabaseConnection,
    policy: AttendancePolicy,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(MISSING_CHECKOUT_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            if let Err(e) = flag_missing_checkouts(&db, policy).await {
                tracing::error!("Error flagging missing check-outs: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Attendance scheduler started");

    Ok(scheduler)
}

/// Flags open records dated before today (UTC).
pub async fn flag_missing_checkouts(
    db: &DatabaseConnection,
    policy: AttendancePolicy,
) -> Result<u64, AppError> {
    let today = Utc::now().date_naive();

    let flagged = AttendanceService::new(db, policy)
        .mark_missing_checkouts(today)
        .await?;

    if flagged > 0 {
        tracing::info!("Flagged {} attendance records as missing check-out", flagged);
    }

    Ok(flagged)
}
