use super::*;

/// Tests listing as organizer or participant inside the window.
///
/// Expected: organized and attended meetings in range, soonest first; others excluded
#[tokio::test]
async fn returns_involved_meetings_within_range() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_meeting_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let colleague = factory::create_user(db).await?;
    let day = |d: u32| Utc.with_ymd_and_hms(2025, 6, d, 9, 0, 0).unwrap();

    let attended = factory::meeting::MeetingFactory::new(db, colleague.id)
        .starts_at(day(3), day(3) + Duration::hours(1))
        .participant(user.id)
        .build()
        .await?;
    let organized = factory::meeting::MeetingFactory::new(db, user.id)
        .starts_at(day(2), day(2) + Duration::hours(1))
        .build()
        .await?;
    // Not involved.
    factory::meeting::MeetingFactory::new(db, colleague.id)
        .starts_at(day(2), day(2) + Duration::hours(1))
        .build()
        .await?;
    // Out of range.
    factory::meeting::MeetingFactory::new(db, user.id)
        .starts_at(day(9), day(9) + Duration::hours(1))
        .build()
        .await?;

    let meetings = MeetingRepository::new(db)
        .get_for_user(user.id, day(1), Some(day(5)))
        .await?;

    let ids: Vec<i32> = meetings.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![organized.id, attended.id]);
    assert_eq!(meetings[1].participant_ids, vec![user.id]);

    Ok(())
}

/// Expected: without an upper bound every later meeting is returned
#[tokio::test]
async fn open_ended_range_includes_later_meetings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_meeting_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let from = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();

    factory::meeting::MeetingFactory::new(db, user.id)
        .starts_at(from - Duration::days(1), from - Duration::hours(23))
        .build()
        .await?;
    factory::meeting::MeetingFactory::new(db, user.id)
        .starts_at(from + Duration::days(300), from + Duration::days(300) + Duration::hours(1))
        .build()
        .await?;

    let meetings = MeetingRepository::new(db)
        .get_for_user(user.id, from, None)
        .await?;

    assert_eq!(meetings.len(), 1);

    Ok(())
}
