use super::*;

/// Expected: meeting stored with both participants, readable via `find_by_id`
#[tokio::test]
async fn creates_meeting_with_participants() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_meeting_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::create_user(db).await?;
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let start_at = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();

    let repo = MeetingRepository::new(db);
    let meeting = repo
        .create(CreateMeetingParams {
            organizer_id: organizer.id,
            organization_id: None,
            title: "Planning".to_string(),
            description: Some("Quarterly planning".to_string()),
            location: Some("Room 4".to_string()),
            start_at,
            end_at: start_at + Duration::hours(1),
            participant_ids: vec![second.id, first.id],
        })
        .await?;

    assert_eq!(meeting.title, "Planning");
    assert_eq!(meeting.participant_ids, vec![first.id, second.id]);

    let found = repo.find_by_id(meeting.id).await?.expect("meeting exists");
    assert_eq!(found.id, meeting.id);
    assert_eq!(found.participant_ids, meeting.participant_ids);
    assert_eq!(found.start_at, start_at);

    Ok(())
}

/// Expected: Ok(true) for the meeting and its participants gone, then Ok(false)
#[tokio::test]
async fn deletes_meeting() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_meeting_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::create_user(db).await?;
    let participant = factory::create_user(db).await?;
    let meeting = factory::meeting::MeetingFactory::new(db, organizer.id)
        .participant(participant.id)
        .build()
        .await?;

    let repo = MeetingRepository::new(db);

    assert!(repo.delete(meeting.id).await?);
    assert!(repo.find_by_id(meeting.id).await?.is_none());
    assert!(!repo.delete(meeting.id).await?);

    Ok(())
}
