//! PubMed literature search client.
//!
//! Fetches search-result and article pages and runs the [`parse`] heuristics
//! over them. Scraping is explicitly best-effort: any transport or parse
//! problem degrades to an empty/absent result and is only logged, never
//! surfaced as an error to callers.

pub mod parse;

pub use parse::SearchHit;

use crate::config::PubMedConfig;
use std::time::Duration;
use tracing::warn;

pub struct PubMedClient {
    client: reqwest::Client,
    base_url: String,
}

impl PubMedClient {
    pub fn new(config: PubMedConfig) -> Self {
        // failing to build a client here would lose the bounded timeout
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build HTTP client");
        Self { client, base_url: config.base_url.trim_end_matches('/').to_string() }
    }

    /// Search-result request for `query`; the term is query-encoded by reqwest.
    fn search_request(&self, query: &str, page: u32) -> reqwest::RequestBuilder {
        let page = page.to_string();
        self.client
            .get(format!("{}/", self.base_url))
            .query(&[("term", query), ("page", page.as_str())])
    }

    async fn fetch(&self, request: reqwest::RequestBuilder) -> Option<String> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "pubmed fetch failed");
                return None;
            }
        };
        let url = response.url().clone();
        if !response.status().is_success() {
            warn!(%url, status = %response.status(), "pubmed fetch returned non-success");
            return None;
        }
        match response.text().await {
            Ok(html) => Some(html),
            Err(e) => {
                warn!(%url, error = %e, "pubmed body unreadable");
                None
            }
        }
    }

    /// Search result page `page` for `query`; empty on any failure.
    pub async fn search(&self, query: &str, page: u32) -> Vec<SearchHit> {
        let Some(html) = self.fetch(self.search_request(query, page)).await else {
            return Vec::new();
        };
        parse::parse_search_results(&html, &self.base_url)
    }

    /// Abstract text for an article URL; absent on any failure.
    pub async fn fetch_abstract(&self, article_url: &str) -> Option<String> {
        // Accept both absolute PubMed URLs and bare paths
        let url = if article_url.starts_with("http") {
            article_url.to_string()
        } else {
            format!("{}/{}", self.base_url, article_url.trim_start_matches('/'))
        };
        let html = self.fetch(self.client.get(&url)).await?;
        parse::parse_abstract(&html)
    }

    /// Largest advertised result-page count for `query`, floored at 1.
    pub async fn get_total_pages(&self, query: &str) -> u32 {
        let Some(html) = self.fetch(self.search_request(query, 1)).await else {
            return 1;
        };
        parse::parse_total_pages(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_terms_are_query_encoded() {
        let client = PubMedClient::new(PubMedConfig::default());
        let request = client.search_request("COX-2 & pain", 2).build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://pubmed.ncbi.nlm.nih.gov/?term=COX-2+%26+pain&page=2"
        );
    }

    #[test]
    fn search_request_keeps_plain_terms_readable() {
        let client = PubMedClient::new(PubMedConfig::default());
        let request = client.search_request("Curcuma longa", 1).build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://pubmed.ncbi.nlm.nih.gov/?term=Curcuma+longa&page=1"
        );
    }
}
