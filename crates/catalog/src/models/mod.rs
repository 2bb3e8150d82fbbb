//! Domain types for the catalog layer.
//!
//! These are validated domain objects, separate from the raw database rows
//! the repositories decode. Computed display properties (image URLs, city
//! counts) are derived accessors over owned state, never stored columns.

pub mod catalog;
pub mod geo;
pub mod user;

pub use catalog::{Category, NewProduct, PLACEHOLDER_IMAGE_URL, Product, ProductImage};
pub use geo::{City, Country, State};
pub use user::{AccountStatus, NewUser, User, UserType};

/// Build the external object-storage URL for an uploaded blob.
///
/// The display URL follows `{base}/{container}/{id}`; callers decide what to
/// render when the identifier is the nil UUID.
#[must_use]
pub fn blob_url(storage_base_url: &str, container: &str, image_id: uuid::Uuid) -> String {
    format!(
        "{}/{container}/{image_id}",
        storage_base_url.trim_end_matches('/')
    )
}
