use super::*;

/// Tests filtering a list of ids down to existing users.
///
/// Expected: only the ids of inserted users
#[tokio::test]
async fn returns_only_existing_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let a = factory::create_user(db).await?;
    let b = factory::create_user(db).await?;

    let mut ids = UserRepository::new(db)
        .existing_ids(&[a.id, b.id, b.id + 1000])
        .await?;
    ids.sort();

    assert_eq!(ids, vec![a.id, b.id]);

    Ok(())
}

/// Expected: Ok(empty) without querying
#[tokio::test]
async fn empty_input_returns_empty() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(UserRepository::new(db).existing_ids(&[]).await?.is_empty());

    Ok(())
}
