use super::*;

/// Tests the visibility rules applied in SQL.
///
/// The viewer shares the "Sales" department with the author.
///
/// Expected: public and same-department manuals, not private or other-department ones
#[tokio::test]
async fn returns_only_manuals_visible_to_viewer() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_manual_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::UserFactory::new(db)
        .department("Sales")
        .build()
        .await?;
    let viewer = factory::user::UserFactory::new(db)
        .department("Sales")
        .build()
        .await?;

    let public = factory::manual::ManualFactory::new(db, author.id)
        .title("Public")
        .build()
        .await?;
    let same_department = factory::manual::ManualFactory::new(db, author.id)
        .title("Sales only")
        .department("Sales")
        .access_level("department")
        .build()
        .await?;
    factory::manual::ManualFactory::new(db, author.id)
        .title("Finance only")
        .department("Finance")
        .access_level("department")
        .build()
        .await?;
    factory::manual::ManualFactory::new(db, author.id)
        .title("Private")
        .access_level("private")
        .build()
        .await?;

    let (manuals, total) = ManualRepository::new(db)
        .get_visible_paginated(
            &User::from_entity(viewer),
            &ManualFilter::default(),
            0,
            10,
        )
        .await?;

    assert_eq!(total, 2);
    let mut ids: Vec<i32> = manuals.iter().map(|m| m.id).collect();
    ids.sort();
    assert_eq!(ids, vec![public.id, same_department.id]);

    Ok(())
}

/// Tests that the author and admins see private manuals.
///
/// Expected: 1 for the author, 1 for an admin, 0 for anyone else
#[tokio::test]
async fn author_and_admin_see_private_manuals() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_manual_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let admin = factory::user::UserFactory::new(db)
        .admin(true)
        .build()
        .await?;
    let other = factory::create_user(db).await?;
    factory::manual::ManualFactory::new(db, author.id)
        .access_level("private")
        .build()
        .await?;

    let repo = ManualRepository::new(db);
    let filter = ManualFilter::default();

    for (viewer, expected) in [(author, 1), (admin, 1), (other, 0)] {
        let (_, total) = repo
            .get_visible_paginated(&User::from_entity(viewer), &filter, 0, 10)
            .await?;
        assert_eq!(total, expected);
    }

    Ok(())
}

/// Tests the category filter and title search.
///
/// Expected: only the manual in the category whose title contains the search term
#[tokio::test]
async fn filters_by_category_and_title_search() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_manual_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let wanted = factory::manual::ManualFactory::new(db, author.id)
        .title("Expense report guide")
        .category("finance")
        .build()
        .await?;
    factory::manual::ManualFactory::new(db, author.id)
        .title("Travel guide")
        .category("finance")
        .build()
        .await?;
    factory::manual::ManualFactory::new(db, author.id)
        .title("Expense policy")
        .category("hr")
        .build()
        .await?;

    let filter = ManualFilter {
        department: None,
        category: Some("finance".to_string()),
        search: Some("Expense".to_string()),
    };

    let (manuals, total) = ManualRepository::new(db)
        .get_visible_paginated(&User::from_entity(author), &filter, 0, 10)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(manuals[0].id, wanted.id);

    Ok(())
}
