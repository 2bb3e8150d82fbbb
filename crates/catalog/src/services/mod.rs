//! Service layer: external-collaborator contracts used by the seed routine.

pub mod blob;
pub mod identity;

pub use blob::{BlobError, BlobStore, HttpBlobStore, MemoryBlobStore};
pub use identity::{IdentityError, IdentityService};
