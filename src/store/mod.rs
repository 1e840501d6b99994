//! Document-store and object-store seams.
//!
//! The service talks to its backends only through these traits, so the
//! in-memory implementations can stand in for the hosted ones.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    field::{Field, FieldCell, FieldRecord},
    flower::{Flower, FlowerRecord},
};

pub mod memory;
pub mod objects;

pub use memory::MemoryStore;
pub use objects::{MemoryObjectStore, ObjectStore};

pub const FIELDS: &str = "fields";
pub const FLOWERS: &str = "flowers";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No document '{id}' in {collection}.")]
    NotFound { collection: &'static str, id: String },
    #[error("Document '{id}' in {collection} could not be decoded: {source}")]
    Decode {
        collection: &'static str,
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Document could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Storage backend failure: {0}")]
    Backend(String),
}

/// The `fields` and `flowers` collections.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_fields(&self) -> Result<Vec<Field>, StoreError>;

    async fn get_field(&self, id: &str) -> Result<Field, StoreError>;

    async fn create_field(&self, record: FieldRecord) -> Result<Field, StoreError>;

    async fn delete_field(&self, id: &str) -> Result<(), StoreError>;

    /// Replaces the stored cell list unconditionally.
    async fn update_field_grid(&self, id: &str, grid: Vec<FieldCell>) -> Result<(), StoreError>;

    async fn list_flowers(&self) -> Result<Vec<Flower>, StoreError>;

    async fn get_flower(&self, id: &str) -> Result<Flower, StoreError>;

    async fn create_flower(&self, record: FlowerRecord) -> Result<Flower, StoreError>;

    /// Replaces the whole flower document body.
    async fn update_flower(&self, id: &str, record: FlowerRecord) -> Result<Flower, StoreError>;

    /// Fields referencing the flower are left as they are.
    async fn delete_flower(&self, id: &str) -> Result<(), StoreError>;
}
