//! Startup seeding: reference and demo data.
//!
//! Runs once at boot: ensures the schema exists, then fills each empty table
//! with fixed fixtures - categories, the country/state/city tree, roles, two
//! demo users with uploaded avatars, and the eight-product destination
//! catalog. Every step checks for existing data first, so repeated runs
//! change nothing.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{info, instrument, warn};

use skyfare_core::{Email, ProductId};

use crate::db::{
    self, CategoryRepository, GeoRepository, ProductRepository, RepositoryError,
};
use crate::models::{NewProduct, NewUser, UserType};
use crate::services::{BlobError, BlobStore, IdentityError, IdentityService};

/// Password every demo account is registered with. Demo plumbing, not a
/// security mechanism.
const DEMO_PASSWORD: &str = "123456";

const SEED_CATEGORIES: &[&str] = &["Económica", "Ejecutiva/Business", "Premium"];

/// Country -> states -> cities reference tree.
const SEED_COUNTRIES: &[(&str, &[(&str, &[&str])])] = &[
    (
        "Colombia",
        &[
            (
                "Antioquia",
                &["Medellín", "Itagüí", "Envigado", "Bello", "Rionegro"],
            ),
            (
                "Bogotá",
                &["Usaquen", "Champinero", "Santa fe", "Useme", "Bosa"],
            ),
        ],
    ),
    (
        "Estados Unidos",
        &[
            (
                "Florida",
                &["Orlando", "Miami", "Tampa", "Fort Lauderdale", "Key West"],
            ),
            (
                "Texas",
                &["Houston", "San Antonio", "Dallas", "Austin", "El Paso"],
            ),
        ],
    ),
];

/// A demo user fixture.
struct DemoUser {
    document: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
    phone: &'static str,
    address: &'static str,
    image: &'static str,
    user_type: UserType,
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        document: "0520",
        first_name: "Alejandro",
        last_name: "Gómez",
        email: "alego@yopmail.com",
        phone: "305 383 8383",
        address: "Calle Jardín",
        image: "cantinflas.png",
        user_type: UserType::Admin,
    },
    DemoUser {
        document: "2020",
        first_name: "Catalina",
        last_name: "Rojas",
        email: "catarojas@yopmail.com",
        phone: "301 636 6366",
        address: "Calle Luna Calle Sol",
        image: "Mr_bean.png",
        user_type: UserType::User,
    },
];

/// A demo product fixture: a destination tagged with category names and
/// image files to upload.
#[derive(Debug, Clone)]
pub struct DemoProduct {
    /// Product display name.
    pub name: &'static str,
    /// Marketing description.
    pub description: &'static str,
    /// Unit price in whole currency units.
    pub price: i64,
    /// Fractional stock count.
    pub stock: f64,
    /// Category names to link, resolved by exact lookup.
    pub categories: &'static [&'static str],
    /// Image file names under the products asset directory.
    pub images: &'static [&'static str],
}

/// Every demo destination is offered in all three fare categories.
const ALL_FARES: &[&str] = SEED_CATEGORIES;

const DEMO_PRODUCTS: &[DemoProduct] = &[
    DemoProduct {
        name: "Bogotá",
        description: "Destino cosmopolita por excelencia",
        price: 850_000,
        stock: 12.0,
        categories: ALL_FARES,
        images: &["Bogotá.jpg"],
    },
    DemoProduct {
        name: "Cali",
        description: "La sultana del valle",
        price: 650_000,
        stock: 12.0,
        categories: ALL_FARES,
        images: &["Cali.jpg"],
    },
    DemoProduct {
        name: "Cartagena",
        description: "La puerta de oro",
        price: 1_300_000,
        stock: 12.0,
        categories: ALL_FARES,
        images: &["Cartagena.jpg"],
    },
    DemoProduct {
        name: "Medellin",
        description: "Ciudad innovadora",
        price: 870_000,
        stock: 12.0,
        categories: ALL_FARES,
        images: &["Medellin.jpg"],
    },
    DemoProduct {
        name: "San Andrés",
        description: "el mar es de siete colores",
        price: 1_200_000,
        stock: 6.0,
        categories: ALL_FARES,
        images: &["San_Andrés.jpg"],
    },
    DemoProduct {
        name: "Santa Marta",
        description: "Tesoro del Caribe",
        price: 990_000,
        stock: 24.0,
        categories: ALL_FARES,
        images: &["Santa_Marta.jpg"],
    },
    DemoProduct {
        name: "Sincelejo",
        description: "Ciudad de cantos y joropo",
        price: 820_000,
        stock: 12.0,
        categories: ALL_FARES,
        images: &["Sincelejo.jpg"],
    },
    DemoProduct {
        name: "Villavicencio",
        description: "La puerta del llano",
        price: 700_000,
        stock: 6.0,
        categories: ALL_FARES,
        images: &["Villavicencio.jpg"],
    },
];

/// Errors that can abort the seed call.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Schema migration failed.
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Identity operation failed.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Blob upload failed.
    #[error(transparent)]
    Blob(#[from] BlobError),

    /// A hard-coded fixture is invalid.
    #[error("invalid seed fixture: {0}")]
    Fixture(String),
}

/// Summary of what a seed call inserted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Categories inserted.
    pub categories: u64,
    /// Countries inserted (with their state/city trees).
    pub countries: u64,
    /// Users created (registered, role-assigned, confirmed).
    pub users: u64,
    /// Products inserted (with category links and images).
    pub products: u64,
}

/// One-time startup seeder.
pub struct Seeder<'a, B> {
    pool: &'a SqlitePool,
    blob: &'a B,
    assets_dir: PathBuf,
}

impl<'a, B: BlobStore> Seeder<'a, B> {
    /// Create a seeder over a pool, a blob store, and the directory holding
    /// the seed image files.
    pub fn new(pool: &'a SqlitePool, blob: &'a B, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            pool,
            blob,
            assets_dir: assets_dir.into(),
        }
    }

    /// Run the full seed: ensure schema, then populate each empty table.
    ///
    /// Idempotent: a second run changes no counts. Any upload or persistence
    /// failure aborts the call; there is no partial rollback beyond the
    /// store's own statement boundaries.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] on the first failing step.
    #[instrument(skip_all)]
    pub async fn seed(&self) -> Result<SeedReport, SeedError> {
        db::ensure_schema(self.pool).await?;

        let mut report = SeedReport::default();
        self.check_categories(&mut report).await?;
        self.check_countries(&mut report).await?;
        self.check_roles().await?;
        for fixture in DEMO_USERS {
            self.check_user(fixture, &mut report).await?;
        }
        self.check_products(&mut report).await?;

        info!(?report, "seed complete");
        Ok(report)
    }

    async fn check_categories(&self, report: &mut SeedReport) -> Result<(), SeedError> {
        let categories = CategoryRepository::new(self.pool);
        if categories.count().await? > 0 {
            return Ok(());
        }

        for name in SEED_CATEGORIES {
            categories.insert(name).await?;
            report.categories += 1;
        }
        Ok(())
    }

    async fn check_countries(&self, report: &mut SeedReport) -> Result<(), SeedError> {
        let geo = GeoRepository::new(self.pool);
        if geo.count_countries().await? > 0 {
            return Ok(());
        }

        for (country, states) in SEED_COUNTRIES {
            let country_id = geo.insert_country(country).await?;
            for (state, cities) in *states {
                let state_id = geo.insert_state(country_id, state).await?;
                for city in *cities {
                    geo.insert_city(state_id, city).await?;
                }
            }
            report.countries += 1;
        }
        Ok(())
    }

    async fn check_roles(&self) -> Result<(), SeedError> {
        let identity = IdentityService::new(self.pool);
        identity.check_role(UserType::Admin.role_name()).await?;
        identity.check_role(UserType::User.role_name()).await?;
        Ok(())
    }

    async fn check_user(
        &self,
        fixture: &DemoUser,
        report: &mut SeedReport,
    ) -> Result<(), SeedError> {
        let identity = IdentityService::new(self.pool);
        let email = Email::parse(fixture.email).map_err(|e| SeedError::Fixture(e.to_string()))?;

        if identity.get_user(&email).await?.is_some() {
            return Ok(());
        }

        let avatar = self.asset_path("users", fixture.image);
        let image_id = self.blob.upload(&avatar, "users").await?;

        let default_city = GeoRepository::new(self.pool).first_city().await?;

        let user = identity
            .add_user(
                &NewUser {
                    first_name: fixture.first_name.to_owned(),
                    last_name: fixture.last_name.to_owned(),
                    email,
                    phone: fixture.phone.to_owned(),
                    address: fixture.address.to_owned(),
                    document: fixture.document.to_owned(),
                    city_id: default_city.map(|c| c.id),
                    image_id,
                    user_type: fixture.user_type,
                },
                DEMO_PASSWORD,
            )
            .await?;

        identity
            .add_user_to_role(&user, fixture.user_type.role_name())
            .await?;

        // Generate and immediately consume the confirmation token so the
        // demo account is ready to log in.
        let token = identity.generate_email_confirmation_token(&user).await?;
        identity.confirm_email(&user, &token).await?;

        report.users += 1;
        Ok(())
    }

    async fn check_products(&self, report: &mut SeedReport) -> Result<(), SeedError> {
        let products = ProductRepository::new(self.pool);
        if products.count().await? > 0 {
            return Ok(());
        }

        for fixture in DEMO_PRODUCTS {
            self.add_product(fixture).await?;
            report.products += 1;
        }
        Ok(())
    }

    /// Insert one demo product: the row itself, a link per resolvable
    /// category name, and an uploaded image per listed file.
    ///
    /// A category name with no match is skipped with a warning rather than
    /// linked to nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] if an insert or upload fails.
    pub async fn add_product(&self, fixture: &DemoProduct) -> Result<ProductId, SeedError> {
        let products = ProductRepository::new(self.pool);
        let categories = CategoryRepository::new(self.pool);

        let product_id = products
            .insert(&NewProduct {
                name: fixture.name.to_owned(),
                description: fixture.description.to_owned(),
                price: Decimal::from(fixture.price),
                stock: fixture.stock,
            })
            .await?;

        for name in fixture.categories {
            match categories.find_by_name(name).await? {
                Some(category) => {
                    products.add_category_link(product_id, category.id).await?;
                }
                None => {
                    warn!(category = name, product = fixture.name, "unknown category, skipping link");
                }
            }
        }

        for image in fixture.images {
            let path = self.asset_path("products", image);
            let image_id = self.blob.upload(&path, "products").await?;
            products.add_image(product_id, image_id).await?;
        }

        Ok(product_id)
    }

    fn asset_path(&self, kind: &str, file: &str) -> PathBuf {
        let mut path = self.assets_dir.clone();
        path.push("images");
        path.push(kind);
        path.push(file);
        path
    }
}

impl<B> Seeder<'_, B> {
    /// Directory the seed image files are read from.
    #[must_use]
    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }
}
