use super::*;

/// Tests that a participant list replaces the stored one.
///
/// Expected: title changed, participants replaced, times untouched
#[tokio::test]
async fn replaces_participants() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_meeting_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::create_user(db).await?;
    let old = factory::create_user(db).await?;
    let new = factory::create_user(db).await?;
    let meeting = factory::meeting::MeetingFactory::new(db, organizer.id)
        .participant(old.id)
        .build()
        .await?;

    let updated = MeetingRepository::new(db)
        .update(UpdateMeetingParams {
            id: meeting.id,
            title: Some("Renamed".to_string()),
            description: None,
            location: None,
            start_at: None,
            end_at: None,
            participant_ids: Some(vec![new.id]),
        })
        .await?
        .expect("meeting exists");

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.participant_ids, vec![new.id]);
    assert_eq!(updated.start_at, meeting.start_at);

    Ok(())
}

/// Expected: participants kept when no list is given
#[tokio::test]
async fn keeps_participants_when_not_provided() -> Result<(), DbErr> {
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

    let updated = MeetingRepository::new(db)
        .update(UpdateMeetingParams {
            id: meeting.id,
            title: None,
            description: None,
            location: Some("Room 1".to_string()),
            start_at: None,
            end_at: None,
            participant_ids: None,
        })
        .await?
        .expect("meeting exists");

    assert_eq!(updated.location.as_deref(), Some("Room 1"));
    assert_eq!(updated.participant_ids, vec![participant.id]);

    Ok(())
}

/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_meeting() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_meeting_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = MeetingRepository::new(db)
        .update(UpdateMeetingParams {
            id: 999,
            title: Some("x".to_string()),
            description: None,
            location: None,
            start_at: None,
            end_at: None,
            participant_ids: None,
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}
