use super::*;

/// Tests storing an invitation and finding it by code.
///
/// Expected: Ok(Invitation) with zero uses, found by its code
#[tokio::test]
async fn creates_invitation_with_zero_uses() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_organization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let organization = factory::create_organization(db, owner.id).await?;
    let repo = InvitationRepository::new(db);

    let invitation = repo
        .create(CreateInvitationParams {
            organization_id: organization.id,
            created_by: owner.id,
            code: "ABCDEFGH23".to_string(),
            expires_at: None,
            max_uses: Some(3),
        })
        .await?;

    assert_eq!(invitation.use_count, 0);
    assert_eq!(invitation.max_uses, Some(3));

    let found = repo.find_by_code("ABCDEFGH23").await?;
    assert_eq!(found, Some(invitation));
    assert!(repo.code_exists("ABCDEFGH23").await?);
    assert!(!repo.code_exists("ZZZZZZZZZZ").await?);

    Ok(())
}

/// Expected: only the organization's own invitations
#[tokio::test]
async fn lists_invitations_by_organization() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_organization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let first = factory::create_organization(db, owner.id).await?;
    let second = factory::create_organization(db, owner.id).await?;
    factory::create_invitation(db, first.id, owner.id).await?;
    factory::create_invitation(db, first.id, owner.id).await?;
    factory::create_invitation(db, second.id, owner.id).await?;

    let invitations = InvitationRepository::new(db)
        .get_by_organization(first.id)
        .await?;

    assert_eq!(invitations.len(), 2);
    assert!(invitations.iter().all(|i| i.organization_id == first.id));

    Ok(())
}
