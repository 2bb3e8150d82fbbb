//! Product repository, including category links and images.

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use uuid::Uuid;

use skyfare_core::{CategoryId, ProductId, ProductImageId};

use super::RepositoryError;
use crate::models::{Category, NewProduct, Product, ProductImage};

/// Internal row type for product queries.
///
/// Price is stored as text (decimal serialization) and the UUID image
/// identifier as hyphenated text; both are validated on the way out.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: String,
    price: String,
    stock: f64,
}

impl ProductRow {
    fn into_product(
        self,
        categories: Vec<Category>,
        images: Vec<ProductImage>,
    ) -> Result<Product, RepositoryError> {
        let price = Decimal::from_str(&self.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price,
            stock: self.stock,
            categories,
            images,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductImageRow {
    id: ProductImageId,
    product_id: ProductId,
    image_id: String,
}

impl TryFrom<ProductImageRow> for ProductImage {
    type Error = RepositoryError;

    fn try_from(row: ProductImageRow) -> Result<Self, Self::Error> {
        let image_id = Uuid::parse_str(&row.image_id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid image id in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            product_id: row.product_id,
            image_id,
        })
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Count products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Insert a product, returning its new ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, product: &NewProduct) -> Result<ProductId, RepositoryError> {
        let id = sqlx::query_scalar::<_, ProductId>(
            "INSERT INTO products (name, description, price, stock) \
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.to_string())
        .bind(product.stock)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Link a product to a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add_category_link(
        &self,
        product_id: ProductId,
        category_id: CategoryId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO product_categories (product_id, category_id) VALUES (?, ?)")
            .bind(product_id)
            .bind(category_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Attach an uploaded image to a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add_image(
        &self,
        product_id: ProductId,
        image_id: Uuid,
    ) -> Result<ProductImageId, RepositoryError> {
        let id = sqlx::query_scalar::<_, ProductImageId>(
            "INSERT INTO product_images (product_id, image_id) VALUES (?, ?) RETURNING id",
        )
        .bind(product_id)
        .bind(image_id.to_string())
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Look up a product ID by exact name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_id_by_name(&self, name: &str) -> Result<Option<ProductId>, RepositoryError> {
        let id = sqlx::query_scalar::<_, ProductId>("SELECT id FROM products WHERE name = ?")
            .bind(name)
            .fetch_optional(self.pool)
            .await?;

        Ok(id)
    }

    /// Get a product with its categories and images loaded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, price, stock FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let categories = sqlx::query_as::<_, Category>(
            "SELECT c.id, c.name FROM categories c \
             JOIN product_categories pc ON pc.category_id = c.id \
             WHERE pc.product_id = ? ORDER BY c.name ASC",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let images = sqlx::query_as::<_, ProductImageRow>(
            "SELECT id, product_id, image_id FROM product_images \
             WHERE product_id = ? ORDER BY id ASC",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<_>, _>>()?;

        row.into_product(categories, images).map(Some)
    }

    /// Count category links for a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_category_links(&self, id: ProductId) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM product_categories WHERE product_id = ?",
        )
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Count images for a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_images(&self, id: ProductId) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM product_images WHERE product_id = ?",
        )
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}
