//! Topic summary lookup
//!
//! Two-step contract against a MediaWiki-style API: the REST page
//! summary endpoint first, then the legacy query endpoint as fallback.
//! Either way the extract is cut down to something speakable: at most
//! two sentences and 200 characters.

use crate::{Error, Result};

/// Sentinel page id meaning "no article found" in the query endpoint
const MISSING_PAGE_ID: &str = "-1";

/// Maximum characters in a spoken summary
const MAX_SUMMARY_CHARS: usize = 200;

/// Response from the REST summary endpoint
#[derive(serde::Deserialize)]
struct SummaryResponse {
    extract: Option<String>,
}

/// Response from the query-style fallback endpoint
#[derive(serde::Deserialize)]
struct QueryResponse {
    query: QueryPages,
}

#[derive(serde::Deserialize)]
struct QueryPages {
    pages: std::collections::HashMap<String, QueryPage>,
}

#[derive(serde::Deserialize)]
struct QueryPage {
    extract: Option<String>,
}

/// Fetches topic summaries
pub struct SummaryClient {
    client: reqwest::Client,
    base_url: String,
}

impl SummaryClient {
    /// Create a client against a summary API base URL
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Look up a short summary for a topic
    ///
    /// Tries the REST summary endpoint first; on any failure or a missing
    /// extract, falls back to the query endpoint.
    ///
    /// # Errors
    ///
    /// Returns error when both strategies fail
    pub async fn summarize(&self, topic: &str) -> Result<String> {
        match self.fetch_summary(topic).await {
            Ok(extract) => Ok(extract),
            Err(e) => {
                tracing::debug!(error = %e, topic, "summary endpoint failed, trying query endpoint");
                self.fetch_query_extract(topic).await
            }
        }
    }

    /// Primary strategy: REST page summary
    async fn fetch_summary(&self, topic: &str) -> Result<String> {
        let url = format!(
            "{}/api/rest_v1/page/summary/{}",
            self.base_url,
            urlencoding::encode(topic)
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Summary(format!("summary endpoint returned {status}")));
        }

        let result: SummaryResponse = response.json().await?;
        result
            .extract
            .map(|extract| truncate_summary(&extract))
            .ok_or_else(|| Error::Summary("no summary available".to_string()))
    }

    /// Fallback strategy: query endpoint with intro extracts
    async fn fetch_query_extract(&self, topic: &str) -> Result<String> {
        let url = format!(
            "{}/w/api.php?action=query&format=json&prop=extracts&exintro=true&explaintext=true&exsentences=2&titles={}&origin=*",
            self.base_url,
            urlencoding::encode(topic)
        );

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Summary(format!("query endpoint returned {status}")));
        }

        let result: QueryResponse = response.json().await?;
        let (page_id, page) = result
            .query
            .pages
            .iter()
            .next()
            .ok_or_else(|| Error::Summary("query endpoint returned no pages".to_string()))?;

        if page_id.as_str() == MISSING_PAGE_ID {
            return Err(Error::Summary(format!("no article found for '{topic}'")));
        }

        page.extract
            .as_deref()
            .map(truncate_summary)
            .ok_or_else(|| Error::Summary("article has no extract".to_string()))
    }
}

/// Trim an extract to at most two sentences and 200 characters
fn truncate_summary(extract: &str) -> String {
    let summary = extract
        .split(". ")
        .take(2)
        .collect::<Vec<_>>()
        .join(". ");

    if summary.chars().count() > MAX_SUMMARY_CHARS {
        let cut: String = summary.chars().take(MAX_SUMMARY_CHARS).collect();
        format!("{cut}...")
    } else {
        summary
    }
}
