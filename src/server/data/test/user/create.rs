use super::*;

/// Tests creating a user and reading it back.
///
/// Expected: Ok(User) with the given fields and no password hash exposed
#[tokio::test]
async fn creates_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(CreateUserParams {
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            password_hash: "hash".to_string(),
            department: Some("Engineering".to_string()),
            admin: true,
        })
        .await?;

    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.department.as_deref(), Some("Engineering"));
    assert!(user.admin);

    let found = repo.find_by_id(user.id).await?;
    assert_eq!(found, Some(user));
    assert_eq!(repo.count().await?, 1);

    Ok(())
}

/// Tests that email uniqueness is enforced by the database.
///
/// Expected: Err(DbErr) on the second insert
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .email("taken@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    assert!(repo.email_exists("taken@example.com").await?);

    let result = repo
        .create(CreateUserParams {
            email: "taken@example.com".to_string(),
            name: "Second".to_string(),
            password_hash: "hash".to_string(),
            department: None,
            admin: false,
        })
        .await;

    assert!(result.is_err());

    Ok(())
}
