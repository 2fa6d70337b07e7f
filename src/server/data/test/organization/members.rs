use super::*;

/// Tests adding, re-roling and removing a member.
///
/// Expected: each step is reflected in `find_member`
#[tokio::test]
async fn manages_member_lifecycle() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_organization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let user = factory::create_user(db).await?;
    let organization = factory::create_organization(db, owner.id).await?;
    let repo = OrganizationRepository::new(db);

    repo.add_member(organization.id, user.id, MemberRole::Member)
        .await?;
    assert_eq!(repo.count_members(organization.id).await?, 2);

    let promoted = repo
        .set_member_role(organization.id, user.id, MemberRole::Admin)
        .await?
        .expect("member exists");
    assert_eq!(promoted.role, "admin");

    let members = repo.get_members(organization.id).await?;
    assert_eq!(members.len(), 2);
    assert!(members.iter().any(|(m, u)| u.id == user.id && m.role == "admin"));

    assert!(repo.remove_member(organization.id, user.id).await?);
    assert!(repo.find_member(organization.id, user.id).await?.is_none());
    assert!(!repo.remove_member(organization.id, user.id).await?);

    Ok(())
}

/// Expected: Ok(None) when re-roling a non-member
#[tokio::test]
async fn set_role_of_non_member_returns_none() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_organization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let outsider = factory::create_user(db).await?;
    let organization = factory::create_organization(db, owner.id).await?;

    let result = OrganizationRepository::new(db)
        .set_member_role(organization.id, outsider.id, MemberRole::Admin)
        .await?;

    assert!(result.is_none());

    Ok(())
}
