//! Access to a remote STAC catalog.
//!
//! [`CatalogClient`] is the seam the title scanner depends on; [`StacClient`]
//! implements it over HTTP.

mod client;
mod error;
mod types;

pub use client::StacClient;
pub use error::CatalogError;
pub use types::{Collection, Item, Link};

/// Read-only view of a catalog: its collections and the items they hold.
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Every collection in the catalog, in a stable order.
    async fn get_all_collections(&self) -> Result<Vec<Collection>, CatalogError>;

    /// Look up a single collection. An unknown id yields `Ok(None)`.
    async fn get_collection(&self, id: &str) -> Result<Option<Collection>, CatalogError>;

    /// Every item of `collection`, in the order the catalog returns them.
    async fn get_items(&self, collection: &Collection) -> Result<Vec<Item>, CatalogError>;
}
