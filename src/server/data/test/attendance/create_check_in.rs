use super::*;

/// Tests opening a record and closing it with `update_times`.
///
/// Expected: open record, then closed record with hours stored
#[tokio::test]
async fn opens_and_closes_record() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_attendance_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let check_in_at = Utc.with_ymd_and_hms(2025, 3, 3, 8, 55, 0).unwrap();
    let repo = AttendanceRepository::new(db);

    let record = repo
        .create_check_in(CheckInParams {
            user_id: user.id,
            date: date(2025, 3, 3),
            check_in_at,
            status: AttendanceStatus::Present,
            note: None,
        })
        .await?;

    assert_eq!(record.check_in_at, Some(check_in_at));
    assert_eq!(record.check_out_at, None);
    assert_eq!(record.status, "present");

    let check_out_at = Utc.with_ymd_and_hms(2025, 3, 3, 17, 55, 0).unwrap();
    let closed = repo
        .update_times(RecordTimesParams {
            id: record.id,
            check_in_at,
            check_out_at: Some(check_out_at),
            status: AttendanceStatus::Present,
            work_hours: 9.0,
            overtime_hours: 1.0,
            note: Some("late train".to_string()),
        })
        .await?
        .expect("record exists");

    assert_eq!(closed.check_out_at, Some(check_out_at));
    assert_eq!(closed.work_hours, 9.0);
    assert_eq!(closed.overtime_hours, 1.0);
    assert_eq!(closed.note.as_deref(), Some("late train"));

    let found = repo
        .find_by_user_and_date(user.id, date(2025, 3, 3))
        .await?
        .expect("record for date");
    assert_eq!(found.id, record.id);

    Ok(())
}

/// Expected: None for a day without a record, and None for another user's record
#[tokio::test]
async fn finds_record_only_for_user_and_date() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_attendance_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    factory::attendance::AttendanceFactory::new(db, user.id, date(2025, 3, 3))
        .build()
        .await?;

    let repo = AttendanceRepository::new(db);

    assert!(repo.find_by_user_and_date(user.id, date(2025, 3, 3)).await?.is_some());
    assert!(repo.find_by_user_and_date(user.id, date(2025, 3, 4)).await?.is_none());
    assert!(repo.find_by_user_and_date(other.id, date(2025, 3, 3)).await?.is_none());

    Ok(())
}

/// Expected: a second record for the same user and day is rejected by the unique index
#[tokio::test]
async fn one_record_per_user_and_day() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_attendance_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    factory::attendance::AttendanceFactory::new(db, user.id, date(2025, 3, 3))
        .build()
        .await?;

    let duplicate = factory::attendance::AttendanceFactory::new(db, user.id, date(2025, 3, 3))
        .build()
        .await
        .unwrap_err();
    assert!(crate::server::data::is_unique_violation(&duplicate));

    factory::attendance::AttendanceFactory::new(db, other.id, date(2025, 3, 3))
        .build()
        .await?;

    Ok(())
}
