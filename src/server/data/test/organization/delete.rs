use super::*;

/// Tests that deleting an organization removes its memberships.
///
/// Expected: Ok(true), then no organization and no members
#[tokio::test]
async fn deletes_organization_and_members() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_organization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, member, organization) = factory::helpers::create_organization_with_member(db).await?;
    let repo = OrganizationRepository::new(db);

    assert!(repo.delete(organization.id).await?);
    assert!(repo.find_by_id(organization.id).await?.is_none());
    assert!(repo.organization_ids_for_user(member.id).await?.is_empty());

    assert!(!repo.delete(organization.id).await?);

    Ok(())
}
