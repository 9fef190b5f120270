use std::collections::HashSet;
use std::time::Duration;

use reqwest::Url;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::types::{CollectionsPage, ItemsPage, Page, next_link};
use super::{CatalogClient, CatalogError, Collection, Item};
use crate::config::HttpConfig;

const MAX_ERROR_BODY_CHARS: usize = 300;

/// HTTP client for a STAC API root, e.g. `https://api.dive.edito.eu/data`.
#[derive(Debug, Clone)]
pub struct StacClient {
    root: Url,
    inner: reqwest::Client,
    pub http_cfg: HttpConfig,
}

impl StacClient {
    pub fn new(root_url: &str) -> Result<Self, CatalogError> {
        Self::with_http_config(root_url, HttpConfig::default())
    }

    pub fn with_http_config(root_url: &str, cfg: HttpConfig) -> Result<Self, CatalogError> {
        let root = Url::parse(root_url)
            .map_err(|e| CatalogError::InvalidUrl(format!("{root_url}: {e}")))?;
        if root.cannot_be_a_base() || !matches!(root.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidUrl(root_url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let inner = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .user_agent(cfg.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|source| CatalogError::Http {
                url: root.to_string(),
                source,
            })?;

        Ok(Self {
            root,
            inner,
            http_cfg: cfg,
        })
    }

    pub fn root_url(&self) -> &str {
        self.root.as_str()
    }

    /// Base URL of the collections endpoint, useful when logging or debugging.
    pub fn collections_url(&self) -> String {
        self.endpoint(&["collections"]).to_string()
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.root.clone();
        // Never fails: cannot-be-a-base roots are rejected in the constructor.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, CatalogError> {
        debug!(url=%url, "GET");
        let resp = self
            .inner
            .get(url.clone())
            .send()
            .await
            .map_err(|source| CatalogError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|source| CatalogError::Http {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            debug!(url=%url, status=%status.as_u16(), "non-success status");
            return Err(CatalogError::Status {
                url: url.to_string(),
                status,
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|source| CatalogError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Fetch `first` and every page reachable through `next` links.
    async fn collect_pages<P>(&self, first: Url) -> Result<Vec<P::Entry>, CatalogError>
    where
        P: Page + DeserializeOwned,
    {
        let mut entries = Vec::new();
        let mut visited = HashSet::new();
        let first_url = first.to_string();
        let mut next = Some(first);

        while let Some(url) = next.take() {
            if visited.len() >= self.http_cfg.max_pages {
                return Err(CatalogError::TooManyPages {
                    url: first_url,
                    pages: visited.len(),
                });
            }
            if !visited.insert(url.to_string()) {
                warn!(url=%url, "pagination loops back to a visited page; stopping");
                break;
            }
            let page: P = self.get_json(&url).await?;
            let (page_entries, links) = page.into_parts();
            debug!(url=%url, count=page_entries.len(), "page fetched");
            entries.extend(page_entries);

            if let Some(link) = next_link(&links) {
                let href = url
                    .join(&link.href)
                    .map_err(|e| CatalogError::InvalidUrl(format!("{}: {e}", link.href)))?;
                next = Some(href);
            }
        }

        Ok(entries)
    }
}

#[async_trait::async_trait]
impl CatalogClient for StacClient {
    async fn get_all_collections(&self) -> Result<Vec<Collection>, CatalogError> {
        self.collect_pages::<CollectionsPage>(self.endpoint(&["collections"]))
            .await
    }

    async fn get_collection(&self, id: &str) -> Result<Option<Collection>, CatalogError> {
        let url = self.endpoint(&["collections", id]);
        match self.get_json::<Collection>(&url).await {
            Ok(collection) => Ok(Some(collection)),
            Err(e) if e.is_not_found() => {
                debug!(collection=%id, "collection not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn get_items(&self, collection: &Collection) -> Result<Vec<Item>, CatalogError> {
        let mut url = self.endpoint(&["collections", &collection.id, "items"]);
        if self.http_cfg.page_limit > 0 {
            url.query_pairs_mut()
                .append_pair("limit", &self.http_cfg.page_limit.to_string());
        }

        let mut items = self.collect_pages::<ItemsPage>(url).await?;
        for item in &mut items {
            if item.collection.is_none() {
                item.collection = Some(collection.id.clone());
            }
        }
        Ok(items)
    }
}
