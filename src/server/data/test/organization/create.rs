use super::*;

/// Tests that the creator is stored as the owner member.
///
/// Expected: organization row plus one `owner` membership
#[tokio::test]
async fn creates_organization_with_owner_member() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_organization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let repo = OrganizationRepository::new(db);

    let organization = repo
        .create(CreateOrganizationParams {
            owner_id: owner.id,
            name: "Ops".to_string(),
            description: Some("Operations".to_string()),
        })
        .await?;

    assert_eq!(organization.name, "Ops");
    assert_eq!(organization.owner_id, owner.id);

    let member = repo
        .find_member(organization.id, owner.id)
        .await?
        .expect("owner membership");
    assert_eq!(member.role, MemberRole::Owner.as_str());
    assert_eq!(repo.count_members(organization.id).await?, 1);

    Ok(())
}

/// Tests listing organizations the user belongs to.
///
/// Expected: only organizations with a membership row
#[tokio::test]
async fn lists_organizations_for_member() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_organization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, member, organization) =
        factory::helpers::create_organization_with_member(db).await?;
    factory::create_organization(db, owner.id).await?;

    let repo = OrganizationRepository::new(db);

    let for_member = repo.get_for_user(member.id).await?;
    assert_eq!(for_member.len(), 1);
    assert_eq!(for_member[0].0.id, organization.id);
    assert_eq!(for_member[0].1.role, "member");

    assert_eq!(repo.get_for_user(owner.id).await?.len(), 2);
    assert_eq!(repo.organization_ids_for_user(member.id).await?, vec![organization.id]);

    Ok(())
}
