use super::*;

async fn status(repo: &AttendanceRepository<'_>, id: i32) -> Result<String, DbErr> {
    repo.find_by_id(id)
        .await?
        .map(|record| record.status)
        .ok_or_else(|| DbErr::RecordNotFound(format!("attendance {}", id)))
}

/// Tests flagging of open records from past days.
///
/// Expected: only the open record dated before `today` is flagged
#[tokio::test]
async fn flags_open_records_before_today() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_attendance_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let yesterday_open = factory::attendance::AttendanceFactory::new(db, user.id, date(2025, 3, 4))
        .check_in_at(Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap())
        .build()
        .await?;
    let yesterday_closed = factory::attendance::AttendanceFactory::new(db, user.id, date(2025, 3, 3))
        .check_in_at(Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap())
        .check_out_at(Utc.with_ymd_and_hms(2025, 3, 3, 17, 0, 0).unwrap())
        .build()
        .await?;
    let today_open = factory::attendance::AttendanceFactory::new(db, user.id, date(2025, 3, 5))
        .check_in_at(Utc.with_ymd_and_hms(2025, 3, 5, 9, 0, 0).unwrap())
        .build()
        .await?;

    let repo = AttendanceRepository::new(db);
    let flagged = repo.mark_missing_checkouts(date(2025, 3, 5)).await?;

    assert_eq!(flagged, 1);

    assert_eq!(status(&repo, yesterday_open.id).await?, "missing_checkout");
    assert_eq!(status(&repo, yesterday_closed.id).await?, "present");
    assert_eq!(status(&repo, today_open.id).await?, "present");

    // Already flagged rows are not counted again.
    assert_eq!(repo.mark_missing_checkouts(date(2025, 3, 5)).await?, 0);

    Ok(())
}
