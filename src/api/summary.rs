use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::api::types::{PageSummary, SearchResult};
use crate::api::{ApiClientError, WikiClient};
use crate::language::LanguageCode;

/// Percent-encoding set for a single path segment (everything except unreserved chars).
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode_segment(s: &str) -> String {
    utf8_percent_encode(s, SEGMENT_ENCODE_SET).to_string()
}

impl WikiClient {
    /// URL of the summary endpoint for `query` in `lang`.
    pub fn summary_url(&self, lang: LanguageCode, query: &str) -> String {
        format!(
            "{}/api/wiki/{}/{}",
            self.base_url(),
            lang.as_str(),
            encode_segment(query)
        )
    }

    /// Look up the summary of the article titled `query`.
    pub async fn search(
        &self,
        lang: LanguageCode,
        query: &str,
    ) -> Result<SearchResult, ApiClientError> {
        let url = self.summary_url(lang, query);
        tracing::debug!(%url, "fetching summary");
        let summary: PageSummary = self.get_json(&url).await?;
        summary.into_result(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FailureKind, test_client};

    const RUST_BODY: &str = r#"{
        "title": "Rust",
        "extract": "Rust is a programming language.",
        "thumbnail": { "source": "https://upload.example/rust.png" },
        "content_urls": { "desktop": { "page": "https://en.wikipedia.org/wiki/Rust" } }
    }"#;

    #[test]
    fn summary_url_encodes_query_as_one_segment() {
        let client = test_client("https://api.hy-tech.my.id");
        assert_eq!(
            client.summary_url(LanguageCode::En, "Rust (programming language)"),
            "https://api.hy-tech.my.id/api/wiki/en/Rust%20%28programming%20language%29"
        );
        assert_eq!(
            client.summary_url(LanguageCode::Id, "a/b?c"),
            "https://api.hy-tech.my.id/api/wiki/id/a%2Fb%3Fc"
        );
        assert_eq!(
            client.summary_url(LanguageCode::En, ""),
            "https://api.hy-tech.my.id/api/wiki/en/"
        );
    }

    #[tokio::test]
    async fn search_parses_successful_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/wiki/id/Rust")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(RUST_BODY)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let result = client.search(LanguageCode::Id, "Rust").await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.title, "Rust");
        assert_eq!(result.extract, "Rust is a programming language.");
        assert_eq!(
            result.thumbnail_url.as_deref(),
            Some("https://upload.example/rust.png")
        );
        assert_eq!(
            result.content_url.as_deref(),
            Some("https://en.wikipedia.org/wiki/Rust")
        );
    }

    #[tokio::test]
    async fn empty_title_is_reported_as_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/wiki/en/Nothing")
            .with_status(200)
            .with_body(r#"{ "title": "", "extract": "" }"#)
            .create_async()
            .await;

        let err = test_client(&server.url())
            .search(LanguageCode::En, "Nothing")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::NotFound);
        assert_eq!(err.user_message(), "Data not available");
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/wiki/en/Broken")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let err = test_client(&server.url())
            .search(LanguageCode::En, "Broken")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Parse);
        assert_eq!(
            err.user_message(),
            "Data not available, Look for another one."
        );
    }

    #[tokio::test]
    async fn error_status_is_a_network_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/wiki/en/Missing")
            .with_status(404)
            .with_body(r#"{ "title": "Not found." }"#)
            .create_async()
            .await;

        let err = test_client(&server.url())
            .search(LanguageCode::En, "Missing")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiClientError::ApiError { status: 404, .. }));
        assert_eq!(err.kind(), FailureKind::Network);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_failure() {
        let err = test_client("http://127.0.0.1:1")
            .search(LanguageCode::En, "Rust")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Network);
        assert_eq!(
            err.user_message(),
            "Data not available, Look for another one."
        );
    }
}
