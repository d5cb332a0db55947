//! Product Makers Storage Library
//!
//! This crate provides the two persistence seams used by the draft form:
//! the `SessionStore` trait (keyed JSON values scoped to one session) and the
//! `AssetStore` trait (binary uploads that return a committed URL), plus
//! in-memory and local filesystem implementations.
//!
//! # Session key format
//!
//! Draft keys are scoped by form mode:
//!
//! - **Create**: `product-form:create:draft` and `product-form:create:step`
//! - **Edit**: `product-form:edit:{product_id}:draft` and `product-form:edit:{product_id}:step`
//!
//! Key generation is centralized in the `keys` module.

pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use keys::{draft_key, step_key};
#[cfg(feature = "storage-local")]
pub use local::{FileSessionStore, LocalAssetStore};
pub use memory::MemorySessionStore;
pub use traits::{AssetStore, SessionStore, StorageError, StorageResult};
