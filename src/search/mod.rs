//! Client-side title search.
//!
//! The target catalogs do not implement STAC item search, so matching is done
//! by walking every collection in scope and comparing each item's `title`
//! property against the query, case-insensitively.

pub mod progress;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{CatalogClient, CatalogError, Collection, Item};
pub use progress::Progress;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Collection '{0}' not found.")]
    CollectionNotFound(String),

    #[error("could not resolve search scope: {0}")]
    Catalog(#[from] CatalogError),
}

/// Outcome of listing the items of one collection.
#[derive(Debug)]
pub enum CollectionScan {
    Fetched(Vec<Item>),
    Skipped {
        collection_id: String,
        error: CatalogError,
    },
}

/// Running totals over a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub collections: usize,
    pub skipped: usize,
    pub items_inspected: usize,
    pub matches: usize,
}

/// Does `item`'s title contain `needle`? `needle` must already be lowercased.
pub fn title_matches(needle: &str, item: &Item) -> bool {
    item.title().to_lowercase().contains(needle)
}

/// Scans a catalog for items by title. Holds the catalog handle so it can be
/// reused across searches.
#[derive(Debug)]
pub struct TitleScanner<'a, C: ?Sized> {
    catalog: &'a C,
    progress: Progress,
    stats: ScanStats,
}

impl<'a, C> TitleScanner<'a, C>
where
    C: CatalogClient + ?Sized,
{
    pub fn new(catalog: &'a C, verbose: u8) -> Self {
        Self::with_progress(catalog, Progress::stderr(verbose))
    }

    pub fn with_progress(catalog: &'a C, progress: Progress) -> Self {
        Self {
            catalog,
            progress,
            stats: ScanStats::default(),
        }
    }

    /// Totals of the most recent [`TitleScanner::search`].
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Every item in scope whose title contains `title`, ignoring case.
    ///
    /// With `collection` set only that collection is scanned, and an unknown
    /// id fails with [`SearchError::CollectionNotFound`]. Collections whose
    /// items cannot be listed are reported and skipped.
    pub async fn search(
        &mut self,
        title: &str,
        collection: Option<&str>,
    ) -> Result<Vec<Item>, SearchError> {
        self.stats = ScanStats::default();
        let collections = self.resolve_scope(collection).await?;
        let needle = title.to_lowercase();
        let total = collections.len();
        let mut results = Vec::new();

        info!(query=%title, collections=total, "starting title scan");

        for (idx, col) in collections.iter().enumerate() {
            self.progress.status(format_args!(
                "Processing collection {}/{}: {}...",
                idx + 1,
                total,
                col.display_title()
            ));
            self.stats.collections += 1;

            let items = match scan_collection(self.catalog, col).await {
                CollectionScan::Fetched(items) => items,
                CollectionScan::Skipped {
                    collection_id,
                    error,
                } => {
                    warn!(
                        collection=%collection_id,
                        error=%error,
                        "could not fetch items; skipping"
                    );
                    self.progress.warning(format_args!(
                        "Could not fetch items from collection {collection_id}: {error}"
                    ));
                    self.stats.skipped += 1;
                    continue;
                }
            };

            self.progress
                .status(format_args!("found {} items", items.len()));
            self.stats.items_inspected += items.len();

            let before = results.len();
            results.extend(items.into_iter().filter(|item| title_matches(&needle, item)));
            self.stats.matches += results.len() - before;
            debug!(collection=%col.id, matched=results.len() - before, "collection scanned");

            self.progress.detail(format_args!(
                "searched a total of {} items",
                self.stats.items_inspected
            ));
            self.progress
                .detail(format_args!("found {} results", self.stats.matches));
        }

        info!(
            inspected = self.stats.items_inspected,
            matches = self.stats.matches,
            skipped = self.stats.skipped,
            "title scan finished"
        );
        Ok(results)
    }

    async fn resolve_scope(
        &mut self,
        collection: Option<&str>,
    ) -> Result<Vec<Collection>, SearchError> {
        match collection.filter(|id| !id.is_empty()) {
            Some(id) => {
                self.progress
                    .status(format_args!("loading collection: {id}..."));
                match self.catalog.get_collection(id).await? {
                    Some(col) => Ok(vec![col]),
                    None => Err(SearchError::CollectionNotFound(id.to_string())),
                }
            }
            None => {
                self.progress
                    .status(format_args!("loading all collections..."));
                Ok(self.catalog.get_all_collections().await?)
            }
        }
    }
}

async fn scan_collection<C>(catalog: &C, collection: &Collection) -> CollectionScan
where
    C: CatalogClient + ?Sized,
{
    match catalog.get_items(collection).await {
        Ok(items) => CollectionScan::Fetched(items),
        Err(error) => CollectionScan::Skipped {
            collection_id: collection.id.clone(),
            error,
        },
    }
}

/// Search `catalog` for items whose title contains `title` (case-insensitive).
///
/// `verbose == 0` keeps the scan quiet apart from skip warnings; any higher
/// value prints timestamped progress to stderr.
pub async fn search_on_title<C>(
    catalog: &C,
    title: &str,
    collection: Option<&str>,
    verbose: u8,
) -> Result<Vec<Item>, SearchError>
where
    C: CatalogClient + ?Sized,
{
    TitleScanner::new(catalog, verbose)
        .search(title, collection)
        .await
}
