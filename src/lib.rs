//! Case-insensitive title search over STAC catalogs that lack server-side
//! item search.
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use stac_title_search::{StacClient, search_on_title};
//!
//! let catalog = StacClient::new("https://api.dive.edito.eu/data")?;
//! let items = search_on_title(&catalog, "koster", None, 1).await?;
//! for item in &items {
//!     println!("{} {}", item.id, item.title());
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod logging;
pub mod search;
pub mod version;

pub use catalog::{CatalogClient, CatalogError, Collection, Item, StacClient};
pub use search::{SearchError, TitleScanner, search_on_title};
