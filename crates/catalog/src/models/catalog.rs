//! Product catalog domain types.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use skyfare_core::{CategoryId, ProductId, ProductImageId};

use super::blob_url;

/// Display URL served when a product image was never uploaded.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://localhost:7216/images/noimage.png";

/// Object-storage container for product images.
pub const PRODUCT_IMAGE_CONTAINER: &str = "products";

/// A product category. Referenced by many products via the
/// `product_categories` join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Category display name, unique within the seed set.
    pub name: String,
}

/// A catalog product with its loaded associations.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// Longer marketing description.
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Fractional stock count.
    pub stock: f64,
    /// Categories this product is tagged with.
    pub categories: Vec<Category>,
    /// Uploaded images.
    pub images: Vec<ProductImage>,
}

/// Payload for inserting a product; associations are attached separately.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Product display name.
    pub name: String,
    /// Longer marketing description.
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Fractional stock count.
    pub stock: f64,
}

/// An uploaded product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductImage {
    /// Database ID of this image row.
    pub id: ProductImageId,
    /// Product this image belongs to.
    pub product_id: ProductId,
    /// Opaque object-storage identifier; nil when never uploaded.
    pub image_id: Uuid,
}

impl ProductImage {
    /// Derive the display URL for this image.
    ///
    /// A nil identifier means no upload ever happened, so the fixed
    /// placeholder is returned; otherwise the templated object-storage URL
    /// under the `products` container.
    #[must_use]
    pub fn full_path(&self, storage_base_url: &str) -> String {
        if self.image_id.is_nil() {
            PLACEHOLDER_IMAGE_URL.to_owned()
        } else {
            blob_url(storage_base_url, PRODUCT_IMAGE_CONTAINER, self.image_id)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const STORAGE: &str = "https://blobs.example.net";

    fn image(image_id: Uuid) -> ProductImage {
        ProductImage {
            id: ProductImageId::new(1),
            product_id: ProductId::new(1),
            image_id,
        }
    }

    #[test]
    fn test_full_path_placeholder_for_nil_id() {
        assert_eq!(image(Uuid::nil()).full_path(STORAGE), PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_full_path_templated_for_real_id() {
        let id = Uuid::new_v4();
        let path = image(id).full_path(STORAGE);
        assert_eq!(path, format!("{STORAGE}/products/{id}"));
        // The identifier appears exactly once
        assert_eq!(path.matches(&id.to_string()).count(), 1);
    }

    #[test]
    fn test_full_path_trims_trailing_slash() {
        let id = Uuid::new_v4();
        let path = image(id).full_path("https://blobs.example.net/");
        assert_eq!(path, format!("https://blobs.example.net/products/{id}"));
    }
}
