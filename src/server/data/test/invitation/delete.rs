use super::*;

/// Tests that an invitation is only deleted through its own organization.
///
/// Expected: Ok(false) for the wrong organization, Ok(true) for the right one
#[tokio::test]
async fn deletes_only_within_organization() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_organization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let organization = factory::create_organization(db, owner.id).await?;
    let other = factory::create_organization(db, owner.id).await?;
    let invitation = factory::create_invitation(db, organization.id, owner.id).await?;

    let repo = InvitationRepository::new(db);

    assert!(!repo.delete(other.id, invitation.id).await?);
    assert!(repo.delete(organization.id, invitation.id).await?);
    assert!(repo.find_by_code(&invitation.code).await?.is_none());

    Ok(())
}
