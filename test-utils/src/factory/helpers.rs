//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates an organization owned by a fresh user plus one additional member.
///
/// # Returns
/// - `Ok((owner, member, organization))` - Tuple of created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_organization_with_member(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::user::Model,
        entity::organization::Model,
    ),
    DbErr,
> {
    let owner = crate::factory::user::create_user(db).await?;
    let member = crate::factory::user::create_user(db).await?;
    let organization = crate::factory::organization::create_organization(db, owner.id).await?;
    crate::factory::organization::add_member(db, organization.id, member.id, "member").await?;

    Ok((owner, member, organization))
}
