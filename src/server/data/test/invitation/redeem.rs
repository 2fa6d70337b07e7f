use super::*;
use crate::server::data::organization::OrganizationRepository;

/// Tests that uses are counted up to the limit and no further.
///
/// Expected: two joins, then Ok(Redemption::Exhausted) with the count unchanged
#[tokio::test]
async fn stops_counting_at_max_uses() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_organization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let third = factory::create_user(db).await?;
    let organization = factory::create_organization(db, owner.id).await?;
    let invitation = factory::invitation::InvitationFactory::new(db, organization.id, owner.id)
        .code("LIMITED234")
        .max_uses(2)
        .build()
        .await?;

    let repo = InvitationRepository::new(db);

    for (user, expected) in [
        (&first, Redemption::Joined),
        (&second, Redemption::Joined),
        (&third, Redemption::Exhausted),
    ] {
        let outcome = repo.redeem(invitation.id, organization.id, user.id).await?;
        assert_eq!(outcome, expected);
    }

    let stored = repo.find_by_code("LIMITED234").await?.expect("invitation");
    assert_eq!(stored.use_count, 2);
    assert!(stored.is_exhausted());

    let members = OrganizationRepository::new(db);
    assert!(members.find_member(organization.id, second.id).await?.is_some());
    assert!(members.find_member(organization.id, third.id).await?.is_none());

    Ok(())
}

/// Expected: every use recorded when there is no limit
#[tokio::test]
async fn unlimited_invitation_always_counts() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_organization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let joiner = factory::create_user(db).await?;
    let organization = factory::create_organization(db, owner.id).await?;
    let invitation = factory::invitation::InvitationFactory::new(db, organization.id, owner.id)
        .code("OPEN234567")
        .use_count(40)
        .build()
        .await?;

    let repo = InvitationRepository::new(db);
    let outcome = repo.redeem(invitation.id, organization.id, joiner.id).await?;
    assert_eq!(outcome, Redemption::Joined);

    let stored = repo.find_by_code("OPEN234567").await?.expect("invitation");
    assert_eq!(stored.use_count, 41);

    Ok(())
}

/// Tests redeeming for a user whose membership row already exists, as when two joins by
/// the same user overlap.
///
/// Expected: Ok(Redemption::AlreadyMember), use count rolled back, role untouched
#[tokio::test]
async fn existing_membership_rolls_back_use() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_organization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, member, organization) =
        factory::helpers::create_organization_with_member(db).await?;
    let invitation = factory::invitation::InvitationFactory::new(db, organization.id, owner.id)
        .code("TWICE23456")
        .max_uses(1)
        .build()
        .await?;

    let repo = InvitationRepository::new(db);
    let outcome = repo.redeem(invitation.id, organization.id, member.id).await?;
    assert_eq!(outcome, Redemption::AlreadyMember);

    let stored = repo.find_by_code("TWICE23456").await?.expect("invitation");
    assert_eq!(stored.use_count, 0);

    let owner_row = OrganizationRepository::new(db)
        .find_member(organization.id, owner.id)
        .await?
        .expect("owner membership");
    assert_eq!(owner_row.role, "owner");

    Ok(())
}
