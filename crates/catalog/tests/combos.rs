//! Combo helper integration tests against a seeded in-memory store.

#![allow(clippy::unwrap_used)]

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use skyfare_catalog::combos::{CombosHelper, SENTINEL_VALUE};
use skyfare_catalog::db::{CategoryRepository, GeoRepository};
use skyfare_catalog::seed::Seeder;
use skyfare_catalog::services::MemoryBlobStore;
use skyfare_core::{CountryId, StateId};

/// Single connection so every query sees the same in-memory database.
async fn seeded_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");

    let blob = MemoryBlobStore::new();
    Seeder::new(&pool, &blob, "assets").seed().await.unwrap();
    pool
}

fn labels(options: &[skyfare_catalog::combos::ComboOption]) -> Vec<&str> {
    options.iter().map(|o| o.label.as_str()).collect()
}

#[tokio::test]
async fn test_categories_sorted_with_sentinel_first() {
    let pool = seeded_pool().await;
    let combos = CombosHelper::new(&pool);

    let list = combos.categories().await.unwrap();
    assert_eq!(list.first().unwrap().value, SENTINEL_VALUE);
    assert_eq!(
        labels(&list),
        vec![
            "[Seleccione una categoria...",
            "Económica",
            "Ejecutiva/Business",
            "Premium",
        ]
    );

    // Values are the stringified category ids
    let economica = CategoryRepository::new(&pool)
        .find_by_name("Económica")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(list.get(1).unwrap().value, economica.id.to_string());
}

#[tokio::test]
async fn test_categories_excluding_filters_by_id() {
    let pool = seeded_pool().await;
    let combos = CombosHelper::new(&pool);

    let economica = CategoryRepository::new(&pool)
        .find_by_name("Económica")
        .await
        .unwrap()
        .unwrap();

    let list = combos.categories_excluding(&[economica.id]).await.unwrap();
    assert_eq!(
        labels(&list),
        vec![
            "[Seleccione una categoria...",
            "Ejecutiva/Business",
            "Premium",
        ]
    );

    // An empty filter excludes nothing
    let unfiltered = combos.categories_excluding(&[]).await.unwrap();
    assert_eq!(unfiltered, combos.categories().await.unwrap());
}

#[tokio::test]
async fn test_countries_sorted_with_sentinel_first() {
    let pool = seeded_pool().await;
    let combos = CombosHelper::new(&pool);

    let list = combos.countries().await.unwrap();
    assert_eq!(
        labels(&list),
        vec!["[Seleccione una pais...", "Colombia", "Estados Unidos"]
    );
    assert_eq!(list.first().unwrap().value, SENTINEL_VALUE);
}

#[tokio::test]
async fn test_states_cascade_by_country() {
    let pool = seeded_pool().await;
    let combos = CombosHelper::new(&pool);
    let geo = GeoRepository::new(&pool);

    let colombia = geo.find_country_by_name("Colombia").await.unwrap().unwrap();
    let list = combos.states(colombia.id).await.unwrap();
    assert_eq!(
        labels(&list),
        vec![
            "[Seleccione una departamento/estado ...",
            "Antioquia",
            "Bogotá",
        ]
    );

    let usa = geo
        .find_country_by_name("Estados Unidos")
        .await
        .unwrap()
        .unwrap();
    let list = combos.states(usa.id).await.unwrap();
    assert_eq!(
        labels(&list),
        vec![
            "[Seleccione una departamento/estado ...",
            "Florida",
            "Texas",
        ]
    );
}

#[tokio::test]
async fn test_cities_cascade_by_state() {
    let pool = seeded_pool().await;
    let combos = CombosHelper::new(&pool);
    let geo = GeoRepository::new(&pool);

    let antioquia = geo.find_state_by_name("Antioquia").await.unwrap().unwrap();
    let list = combos.cities(antioquia.id).await.unwrap();
    assert_eq!(
        labels(&list),
        vec![
            "[Seleccione una ciudad ...",
            "Bello",
            "Envigado",
            "Itagüí",
            "Medellín",
            "Rionegro",
        ]
    );
}

#[tokio::test]
async fn test_unmatched_parent_yields_sentinel_alone() {
    let pool = seeded_pool().await;
    let combos = CombosHelper::new(&pool);

    let states = combos.states(CountryId::new(999)).await.unwrap();
    assert_eq!(states.len(), 1);
    assert_eq!(states.first().unwrap().value, SENTINEL_VALUE);

    let cities = combos.cities(StateId::new(999)).await.unwrap();
    assert_eq!(cities.len(), 1);
    assert_eq!(cities.first().unwrap().value, SENTINEL_VALUE);
}
