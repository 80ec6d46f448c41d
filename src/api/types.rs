use serde::{Deserialize, Serialize};

use crate::api::ApiClientError;

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Body of `GET /api/wiki/{lang}/{query}`.
///
/// Every field is optional on the wire; [`PageSummary::into_result`] decides
/// which absences are fatal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageSummary {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub extract: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<ImageRef>,
    #[serde(default)]
    pub content_urls: Option<ContentUrls>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentUrls {
    #[serde(default)]
    pub desktop: Option<PageUrls>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageUrls {
    #[serde(default)]
    pub page: Option<String>,
}

// ---------------------------------------------------------------------------
// Domain result
// ---------------------------------------------------------------------------

/// One article summary, ready to become a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub extract: String,
    /// `None` when the response carries no desktop page link; the card then
    /// has no open action.
    pub content_url: Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

impl PageSummary {
    /// Validate the response. A missing or empty title means the API found
    /// no article for `query`.
    pub fn into_result(self, query: &str) -> Result<SearchResult, ApiClientError> {
        let Some(title) = non_empty(self.title) else {
            return Err(ApiClientError::NotFound {
                query: query.to_string(),
            });
        };

        let content_url = self
            .content_urls
            .and_then(|urls| urls.desktop)
            .and_then(|desktop| non_empty(desktop.page));

        Ok(SearchResult {
            title,
            thumbnail_url: self.thumbnail.and_then(|t| non_empty(t.source)),
            extract: self.extract.unwrap_or_default(),
            content_url,
        })
    }
}
