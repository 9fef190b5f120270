use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{url}: gave up after {pages} pages")]
    TooManyPages { url: String, pages: usize },

    #[error("invalid catalog url: {0}")]
    InvalidUrl(String),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let error = CatalogError::Status {
            url: "http://x/collections/fish/items".to_string(),
            status: StatusCode::BAD_GATEWAY,
            body: "upstream down".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "http://x/collections/fish/items returned 502 Bad Gateway: upstream down"
        );
        assert!(!error.is_not_found());

        let error = CatalogError::InvalidUrl("mailto:x".to_string());
        assert_eq!(format!("{}", error), "invalid catalog url: mailto:x");

        let error = CatalogError::TooManyPages {
            url: "http://x/collections/fish/items".to_string(),
            pages: 3,
        };
        assert_eq!(
            format!("{}", error),
            "http://x/collections/fish/items: gave up after 3 pages"
        );
    }
}
