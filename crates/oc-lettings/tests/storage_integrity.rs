mod support;

use oc_lettings::lettings::{LettingRepository, NewLetting};
use oc_lettings::profiles::{NewProfile, NewUser, ProfileRepository};
use oc_lettings::storage::StorageError;
use support::{address, TestSite};

#[tokio::test]
async fn letting_keeps_its_address() {
    let site = TestSite::new().await;
    let letting = site.letting("Beautiful Apartment", 123, "Test Street").await;

    let stored = site
        .lettings
        .fetch(letting.id)
        .await
        .expect("lookup succeeds")
        .expect("letting exists");
    assert_eq!(stored.title, "Beautiful Apartment");
    assert_eq!(stored.address.number, 123);
    assert_eq!(stored.address.street, "Test Street");
    assert_eq!(stored.address.state, "TS");
    assert_eq!(stored.address.zip_code, 12345);
    assert_eq!(stored.address.country_iso_code, "TST");
}

#[tokio::test]
async fn deleting_address_cascades_to_letting() {
    let site = TestSite::new().await;
    let letting = site.letting("Doomed Cottage", 1, "Cliff Edge").await;
    let survivor = site.letting("Sturdy House", 2, "Inland Way").await;

    let deleted = site
        .lettings
        .delete_address(letting.address.id)
        .await
        .expect("delete succeeds");
    assert!(deleted);

    assert!(site
        .lettings
        .fetch(letting.id)
        .await
        .expect("lookup succeeds")
        .is_none());
    let remaining = site.lettings.list().await.expect("list succeeds");
    assert_eq!(remaining, vec![survivor]);
}

#[tokio::test]
async fn deleting_missing_address_reports_nothing_removed() {
    let site = TestSite::new().await;
    let deleted = site.lettings.delete_address(404).await.expect("delete runs");
    assert!(!deleted);
}

#[tokio::test]
async fn address_serves_at_most_one_letting() {
    let site = TestSite::new().await;
    let letting = site.letting("First Claim", 7, "Shared Lane").await;

    let err = site
        .lettings
        .insert_letting(NewLetting {
            title: "Second Claim".to_string(),
            address_id: letting.address.id,
        })
        .await
        .expect_err("address already taken");
    assert!(err.is_integrity(), "{err}");
}

#[tokio::test]
async fn letting_needs_existing_address() {
    let site = TestSite::new().await;
    let err = site
        .lettings
        .insert_letting(NewLetting {
            title: "Castle in the Air".to_string(),
            address_id: 12_345,
        })
        .await
        .expect_err("no such address");
    assert!(err.is_integrity(), "{err}");
}

#[tokio::test]
async fn invalid_address_is_rejected_before_storage() {
    let site = TestSite::new().await;
    let bad = address(0, "Nowhere Street");

    match site.lettings.insert_address(bad).await {
        Err(StorageError::Validation(err)) => assert_eq!(err.field, "number"),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(site.lettings.list().await.expect("list succeeds").is_empty());
}

#[tokio::test]
async fn schema_checks_back_up_validation() {
    let site = TestSite::new().await;
    let err = sqlx::query(
        "INSERT INTO lettings_address (number, street, city, state, zip_code, country_iso_code) \
         VALUES (10000, 'Big Number Road', 'Town', 'TS', 12345, 'TST')",
    )
    .execute(site.database.pool())
    .await
    .expect_err("number above 9999");
    assert!(StorageError::from(err).is_integrity());
}

#[tokio::test]
async fn deleting_user_cascades_to_profile() {
    let site = TestSite::new().await;
    let profile = site.profile("cascadeuser", "Berlin").await;

    let deleted = site
        .profiles
        .delete_user(profile.user.id)
        .await
        .expect("delete succeeds");
    assert!(deleted);

    assert!(site
        .profiles
        .fetch_by_username("cascadeuser")
        .await
        .expect("lookup succeeds")
        .is_none());
    assert!(site.profiles.list().await.expect("list succeeds").is_empty());
}

#[tokio::test]
async fn user_has_at_most_one_profile() {
    let site = TestSite::new().await;
    let profile = site.profile("uniqueuser", "Madrid").await;

    let err = site
        .profiles
        .insert_profile(NewProfile {
            user_id: profile.user.id,
            favorite_city: "Valencia".to_string(),
        })
        .await
        .expect_err("second profile violates one-to-one");
    assert!(err.is_integrity(), "{err}");

    let stored = site
        .profiles
        .fetch_by_username("uniqueuser")
        .await
        .expect("lookup succeeds")
        .expect("profile exists");
    assert_eq!(stored.favorite_city, "Madrid");
}

#[tokio::test]
async fn usernames_are_unique() {
    let site = TestSite::new().await;
    site.user("taken").await;

    let err = site
        .profiles
        .insert_user(NewUser::new("taken"))
        .await
        .expect_err("username already exists");
    assert!(err.is_integrity(), "{err}");
}

#[tokio::test]
async fn overlong_favorite_city_is_rejected() {
    let site = TestSite::new().await;
    let user = site.user("wanderer").await;

    let err = site
        .profiles
        .insert_profile(NewProfile {
            user_id: user.id,
            favorite_city: "L".repeat(65),
        })
        .await
        .expect_err("city too long");
    assert!(matches!(err, StorageError::Validation(ref e) if e.field == "favorite_city"));
}
