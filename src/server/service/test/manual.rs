use test_utils::{builder::TestBuilder, factory};

use crate::{
    model::manual::{AccessLevel, CreateManualDto, EditPermission, UpdateManualDto},
    server::{
        error::{auth::AuthError, AppError},
        model::{
            manual::{CreateManualParams, UpdateManualParams},
            user::User,
        },
        service::manual::ManualService,
    },
};

fn rename(id: i32) -> UpdateManualParams {
    UpdateManualParams::from_dto(
        id,
        UpdateManualDto {
            title: Some("Renamed".to_string()),
            ..Default::default()
        },
    )
}

/// Expected: department taken from the author when omitted
#[tokio::test]
async fn create_defaults_department_to_author() -> Result<(), AppError> {
    let test = TestBuilder::new().with_manual_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = User::from_entity(
        factory::user::UserFactory::new(db)
            .department("Support")
            .build()
            .await?,
    );

    let manual = ManualService::new(db)
        .create(CreateManualParams::from_dto(
            &author,
            CreateManualDto {
                title: "  Escalations  ".to_string(),
                content: "Call the lead".to_string(),
                ..Default::default()
            },
        ))
        .await?;

    assert_eq!(manual.title, "Escalations");
    assert_eq!(manual.department.as_deref(), Some("Support"));

    Ok(())
}

/// Expected: Err(AppError::Validation) for a blank title
#[tokio::test]
async fn create_requires_title() -> Result<(), AppError> {
    let test = TestBuilder::new().with_manual_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = User::from_entity(factory::create_user(db).await?);

    let result = ManualService::new(db)
        .create(CreateManualParams::from_dto(
            &author,
            CreateManualDto {
                title: "   ".to_string(),
                ..Default::default()
            },
        ))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}

/// Tests the edit permission ladder for a visible manual.
///
/// Expected: `author` blocks a colleague, `department` lets the same department edit
#[tokio::test]
async fn edit_permission_controls_updates() -> Result<(), AppError> {
    let test = TestBuilder::new().with_manual_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::UserFactory::new(db)
        .department("Ops")
        .build()
        .await?;
    let colleague = User::from_entity(
        factory::user::UserFactory::new(db)
            .department("Ops")
            .build()
            .await?,
    );

    let locked = factory::manual::ManualFactory::new(db, author.id)
        .department("Ops")
        .build()
        .await?;
    let shared = factory::manual::ManualFactory::new(db, author.id)
        .department("Ops")
        .edit_permission("department")
        .build()
        .await?;

    let service = ManualService::new(db);

    let denied = service.update(rename(locked.id), &colleague).await;
    assert!(matches!(
        denied,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let updated = service.update(rename(shared.id), &colleague).await?;
    assert_eq!(updated.title, "Renamed");

    Ok(())
}

/// Tests that hidden manuals behave as missing.
///
/// Expected: NotFound for reading, updating and deleting another user's private manual
#[tokio::test]
async fn private_manual_is_not_found_for_others() -> Result<(), AppError> {
    let test = TestBuilder::new().with_manual_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let other = User::from_entity(factory::create_user(db).await?);
    let manual = factory::manual::ManualFactory::new(db, author.id)
        .access_level("private")
        .build()
        .await?;

    let service = ManualService::new(db);

    assert!(matches!(
        service.get(manual.id, &other).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.update(rename(manual.id), &other).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.delete(manual.id, &other).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Expected: editors who are not the author cannot delete; an admin can
#[tokio::test]
async fn only_author_or_admin_deletes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_manual_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let editor = User::from_entity(factory::create_user(db).await?);
    let admin = User::from_entity(factory::user::UserFactory::new(db).admin(true).build().await?);
    let manual = factory::manual::ManualFactory::new(db, author.id)
        .edit_permission("everyone")
        .build()
        .await?;

    let service = ManualService::new(db);

    assert!(matches!(
        service.delete(manual.id, &editor).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    service.delete(manual.id, &admin).await?;
    assert!(matches!(
        service.get(manual.id, &admin).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests that a delegated editor cannot change who sees or edits a manual.
///
/// Expected: AccessDenied for an `everyone` editor making the manual private, the manual stays
/// readable by others, content edits and unchanged access values still pass, the author may
/// change access
#[tokio::test]
async fn only_author_or_admin_changes_access() -> Result<(), AppError> {
    let test = TestBuilder::new().with_manual_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = User::from_entity(
        factory::user::UserFactory::new(db)
            .department("Support")
            .build()
            .await?,
    );
    let editor = User::from_entity(
        factory::user::UserFactory::new(db)
            .department("Sales")
            .build()
            .await?,
    );
    let reader = User::from_entity(factory::create_user(db).await?);

    let manual = factory::manual::ManualFactory::new(db, author.id)
        .department("Support")
        .access_level("public")
        .edit_permission("everyone")
        .build()
        .await?;

    let service = ManualService::new(db);
    let update = |dto: UpdateManualDto| UpdateManualParams::from_dto(manual.id, dto);

    let hide = service
        .update(
            update(UpdateManualDto {
                access_level: Some(AccessLevel::Private),
                ..Default::default()
            }),
            &editor,
        )
        .await;
    assert!(matches!(
        hide,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let lock = service
        .update(
            update(UpdateManualDto {
                edit_permission: Some(EditPermission::Author),
                ..Default::default()
            }),
            &editor,
        )
        .await;
    assert!(lock.is_err());

    let move_department = service
        .update(
            update(UpdateManualDto {
                department: Some("Sales".to_string()),
                ..Default::default()
            }),
            &editor,
        )
        .await;
    assert!(move_department.is_err());

    let still_public = service.get(manual.id, &reader).await?;
    assert_eq!(still_public.access_level, AccessLevel::Public);

    let edited = service
        .update(
            update(UpdateManualDto {
                content: Some("Updated steps".to_string()),
                access_level: Some(AccessLevel::Public),
                ..Default::default()
            }),
            &editor,
        )
        .await?;
    assert_eq!(edited.content, "Updated steps");

    let hidden = service
        .update(
            update(UpdateManualDto {
                access_level: Some(AccessLevel::Private),
                ..Default::default()
            }),
            &author,
        )
        .await?;
    assert_eq!(hidden.access_level, AccessLevel::Private);
    assert!(matches!(
        service.get(manual.id, &reader).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
