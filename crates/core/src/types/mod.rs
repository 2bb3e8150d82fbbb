//! Shared newtype wrappers.

pub mod email;
pub mod id;

pub use email::{Email, EmailError};
pub use id::{CategoryId, CityId, CountryId, ProductId, ProductImageId, RoleId, StateId, UserId};
