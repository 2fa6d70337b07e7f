use super::*;

/// Tests member, manager and owner checks for each role.
///
/// Expected: owner passes all three, `admin` passes member and manager, `member` passes
/// member only
#[tokio::test]
async fn checks_roles_against_permission_level() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_organization_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let owner = factory::create_user(db).await?;
    let org_admin = factory::create_user(db).await?;
    let member = factory::create_user(db).await?;
    let organization = factory::create_organization(db, owner.id).await?;
    factory::add_member(db, organization.id, org_admin.id, "admin").await?;
    factory::add_member(db, organization.id, member.id, "member").await?;

    let cases = [
        (owner.id, [true, true, true]),
        (org_admin.id, [true, true, false]),
        (member.id, [true, false, false]),
    ];

    for (user_id, expected) in cases {
        AuthSession::new(session).set_user_id(user_id).await?;
        let guard = AuthGuard::new(db, session);

        let member_ok = guard
            .require(&[Permission::OrganizationMember(organization.id)])
            .await
            .is_ok();
        let manager_ok = guard
            .require(&[Permission::OrganizationManager(organization.id)])
            .await
            .is_ok();
        let owner_ok = guard
            .require(&[Permission::OrganizationOwner(organization.id)])
            .await
            .is_ok();

        assert_eq!([member_ok, manager_ok, owner_ok], expected, "user {}", user_id);
    }

    Ok(())
}

/// Tests that outsiders are denied and unknown organizations answer 404.
///
/// Expected: AccessDenied for an existing organization, NotFound for a missing one
#[tokio::test]
async fn distinguishes_missing_organization_from_non_member() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_organization_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let owner = factory::create_user(db).await?;
    let outsider = factory::create_user(db).await?;
    let organization = factory::create_organization(db, owner.id).await?;
    AuthSession::new(session).set_user_id(outsider.id).await?;

    let guard = AuthGuard::new(db, session);

    let denied = guard
        .require(&[Permission::OrganizationMember(organization.id)])
        .await;
    assert!(matches!(
        denied,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let missing = guard
        .require(&[Permission::OrganizationMember(organization.id + 100)])
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    Ok(())
}
