use super::*;

/// Tests inclusive date bounds and per-user scoping.
///
/// Expected: records on 3rd..=5th of the user only, oldest first
#[tokio::test]
async fn returns_user_records_within_inclusive_range() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_attendance_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    for day in [2, 3, 4, 5, 6] {
        factory::attendance::AttendanceFactory::new(db, user.id, date(2025, 3, day))
            .build()
            .await?;
    }
    factory::attendance::AttendanceFactory::new(db, other.id, date(2025, 3, 4))
        .build()
        .await?;

    let records = AttendanceRepository::new(db)
        .get_range(user.id, date(2025, 3, 3), date(2025, 3, 5))
        .await?;

    let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![date(2025, 3, 3), date(2025, 3, 4), date(2025, 3, 5)]);
    assert!(records.iter().all(|r| r.user_id == user.id));

    Ok(())
}
