use super::*;

/// Tests a partial update that clears the description.
///
/// Expected: name kept, description removed
#[tokio::test]
async fn clears_description_and_keeps_name() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_organization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let organization = factory::organization::OrganizationFactory::new(db, owner.id)
        .name("Sales")
        .description("Old")
        .build()
        .await?;

    let updated = OrganizationRepository::new(db)
        .update(UpdateOrganizationParams {
            id: organization.id,
            name: None,
            description: Some(None),
        })
        .await?
        .expect("organization exists");

    assert_eq!(updated.name, "Sales");
    assert_eq!(updated.description, None);

    Ok(())
}

/// Expected: Ok(None) for an unknown id
#[tokio::test]
async fn returns_none_for_missing_organization() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_organization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = OrganizationRepository::new(db)
        .update(UpdateOrganizationParams {
            id: 99,
            name: Some("Nope".to_string()),
            description: None,
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}
