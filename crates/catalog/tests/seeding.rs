//! Seed routine integration tests against an in-memory store.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use skyfare_catalog::db::{self, CategoryRepository, GeoRepository, ProductRepository, UserRepository};
use skyfare_catalog::models::{AccountStatus, UserType};
use skyfare_catalog::seed::{DemoProduct, SeedReport, Seeder};
use skyfare_catalog::services::{IdentityError, IdentityService, MemoryBlobStore};
use skyfare_core::Email;

/// Single connection so every query sees the same in-memory database.
async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool")
}

#[tokio::test]
async fn test_seed_populates_empty_store() {
    let pool = memory_pool().await;
    let blob = MemoryBlobStore::new();
    let seeder = Seeder::new(&pool, &blob, "assets");

    let report = seeder.seed().await.unwrap();
    assert_eq!(
        report,
        SeedReport {
            categories: 3,
            countries: 2,
            users: 2,
            products: 8,
        }
    );

    assert_eq!(CategoryRepository::new(&pool).count().await.unwrap(), 3);
    assert_eq!(GeoRepository::new(&pool).count_countries().await.unwrap(), 2);
    assert_eq!(ProductRepository::new(&pool).count().await.unwrap(), 8);
    assert_eq!(UserRepository::new(&pool).count().await.unwrap(), 2);
    assert_eq!(UserRepository::new(&pool).count_roles().await.unwrap(), 2);

    let states = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM states")
        .fetch_one(&pool)
        .await
        .unwrap();
    let cities = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cities")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(states, 4);
    assert_eq!(cities, 20);

    // 2 avatars + 8 product images went to object storage
    let uploads = blob.uploads();
    assert_eq!(uploads.len(), 10);
    assert_eq!(uploads.iter().filter(|u| u.container == "users").count(), 2);
    assert_eq!(
        uploads.iter().filter(|u| u.container == "products").count(),
        8
    );
}

#[tokio::test]
async fn test_seed_twice_changes_no_counts() {
    let pool = memory_pool().await;
    let blob = MemoryBlobStore::new();
    let seeder = Seeder::new(&pool, &blob, "assets");

    seeder.seed().await.unwrap();
    let second = seeder.seed().await.unwrap();

    assert_eq!(second, SeedReport::default());
    assert_eq!(CategoryRepository::new(&pool).count().await.unwrap(), 3);
    assert_eq!(GeoRepository::new(&pool).count_countries().await.unwrap(), 2);
    assert_eq!(ProductRepository::new(&pool).count().await.unwrap(), 8);
    assert_eq!(UserRepository::new(&pool).count().await.unwrap(), 2);
    // No further uploads on the second run
    assert_eq!(blob.uploads().len(), 10);
}

#[tokio::test]
async fn test_demo_users_are_registered_confirmed_and_role_assigned() {
    let pool = memory_pool().await;
    let blob = MemoryBlobStore::new();
    Seeder::new(&pool, &blob, "assets").seed().await.unwrap();

    let identity = IdentityService::new(&pool);
    let users = UserRepository::new(&pool);

    let admin = identity
        .get_user(&Email::parse("alego@yopmail.com").unwrap())
        .await
        .unwrap()
        .expect("seeded admin");
    assert_eq!(admin.user_type, UserType::Admin);
    assert_eq!(admin.status, AccountStatus::Confirmed);
    assert!(!admin.image_id.is_nil());
    assert!(admin.city_id.is_some(), "default city attached");
    assert_eq!(users.roles_of(admin.id).await.unwrap(), vec!["Admin"]);

    let customer = identity
        .get_user(&Email::parse("catarojas@yopmail.com").unwrap())
        .await
        .unwrap()
        .expect("seeded customer");
    assert_eq!(customer.user_type, UserType::User);
    assert_eq!(customer.status, AccountStatus::Confirmed);
    assert_eq!(users.roles_of(customer.id).await.unwrap(), vec!["User"]);

    // Demo accounts log in with the fixed demo password
    assert!(identity.validate_credentials(&admin, "123456").await.unwrap());
    assert!(!identity.validate_credentials(&admin, "654321").await.unwrap());
}

#[tokio::test]
async fn test_seeded_product_has_three_categories_and_one_image() {
    let pool = memory_pool().await;
    let blob = MemoryBlobStore::new();
    Seeder::new(&pool, &blob, "assets").seed().await.unwrap();

    let products = ProductRepository::new(&pool);

    for name in ["Bogotá", "Cali", "Cartagena", "Villavicencio"] {
        let id = products.find_id_by_name(name).await.unwrap().expect(name);
        assert_eq!(products.count_category_links(id).await.unwrap(), 3);
        assert_eq!(products.count_images(id).await.unwrap(), 1);
    }

    let bogota_id = products.find_id_by_name("Bogotá").await.unwrap().unwrap();
    let bogota = products.get(bogota_id).await.unwrap().unwrap();
    assert_eq!(bogota.description, "Destino cosmopolita por excelencia");
    assert_eq!(bogota.price, Decimal::from(850_000));
    assert!((bogota.stock - 12.0).abs() < f64::EPSILON);

    let image = bogota.images.first().unwrap();
    let path = image.full_path("https://blobs.example.net");
    assert_eq!(
        path,
        format!("https://blobs.example.net/products/{}", image.image_id)
    );
}

#[tokio::test]
async fn test_state_cities_number_matches_loaded_cities() {
    let pool = memory_pool().await;
    let blob = MemoryBlobStore::new();
    Seeder::new(&pool, &blob, "assets").seed().await.unwrap();

    let geo = GeoRepository::new(&pool);

    let antioquia = geo
        .find_state_by_name("Antioquia")
        .await
        .unwrap()
        .expect("seeded state");
    assert_eq!(antioquia.cities_number(), 5);

    // A fresh state with no cities counts zero
    let colombia = geo
        .find_country_by_name("Colombia")
        .await
        .unwrap()
        .expect("seeded country");
    let empty_id = geo.insert_state(colombia.id, "Amazonas").await.unwrap();
    let empty = geo.get_state(empty_id).await.unwrap().unwrap();
    assert_eq!(empty.cities_number(), 0);
}

#[tokio::test]
async fn test_unknown_category_name_produces_no_link() {
    let pool = memory_pool().await;
    let blob = MemoryBlobStore::new();
    let seeder = Seeder::new(&pool, &blob, "assets");

    db::ensure_schema(&pool).await.unwrap();
    CategoryRepository::new(&pool)
        .insert("Económica")
        .await
        .unwrap();

    let fixture = DemoProduct {
        name: "Leticia",
        description: "Puerta de la Amazonía",
        price: 500_000,
        stock: 4.0,
        categories: &["Económica", "No existe"],
        images: &["Leticia.jpg"],
    };

    let id = seeder.add_product(&fixture).await.unwrap();

    // Only the resolvable name is linked; the unknown one is skipped
    let products = ProductRepository::new(&pool);
    assert_eq!(products.count_category_links(id).await.unwrap(), 1);
    let product = products.get(id).await.unwrap().unwrap();
    assert_eq!(product.categories.len(), 1);
    assert_eq!(product.categories.first().unwrap().name, "Económica");
}

#[tokio::test]
async fn test_wrong_confirmation_token_is_rejected() {
    let pool = memory_pool().await;
    let blob = MemoryBlobStore::new();
    Seeder::new(&pool, &blob, "assets").seed().await.unwrap();

    let identity = IdentityService::new(&pool);
    let admin = identity
        .get_user(&Email::parse("alego@yopmail.com").unwrap())
        .await
        .unwrap()
        .unwrap();

    // Already confirmed by the seed: no token is pending anymore
    let result = identity.confirm_email(&admin, "stale-token").await;
    assert!(matches!(result, Err(IdentityError::InvalidToken)));

    // A freshly generated token only matches itself
    let token = identity
        .generate_email_confirmation_token(&admin)
        .await
        .unwrap();
    assert!(matches!(
        identity.confirm_email(&admin, "not-the-token").await,
        Err(IdentityError::InvalidToken)
    ));
    identity.confirm_email(&admin, &token).await.unwrap();
}
