//! Blog-search client.
//!
//! The API decorates matched terms with HTML tags inside titles and
//! descriptions; those are stripped before the posts reach the view.

use std::sync::Arc;
use std::time::Duration;

use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tripcast_core::config::SearchConfig;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const CLIENT_ID_HEADER: &str = "X-Naver-Client-Id";
const CLIENT_SECRET_HEADER: &str = "X-Naver-Client-Secret";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Malformed payload: {0}")]
    Payload(String),

    #[error("Search client configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Deserialize)]
struct BlogResponse {
    #[serde(default)]
    items: Vec<BlogItem>,
}

#[derive(Debug, Deserialize)]
struct BlogItem {
    title: String,
    link: String,
    #[serde(rename = "bloggername")]
    blogger: String,
    #[serde(rename = "postdate")]
    posted: String,
    description: String,
}

/// One search hit, with markup already removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    pub title: String,
    pub link: String,
    pub blogger: String,
    pub posted: String,
    pub summary: String,
}

#[derive(Debug, Clone)]
pub struct BlogSearchClient {
    client: Arc<Client>,
    base_url: String,
    client_id: String,
    client_secret: String,
    display: u32,
    tag: Regex,
}

impl BlogSearchClient {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        let tag = Regex::new(r"<[^>]*>").map_err(|e| SearchError::Config(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            display: config.display,
            tag,
        })
    }

    /// Search blog posts for `query`. An empty result list is a normal
    /// outcome, not an error.
    pub async fn search(&self, query: &str) -> Result<Vec<BlogPost>, SearchError> {
        tracing::debug!("Searching blog posts for \"{}\"", query);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("query", query), ("display", &self.display.to_string())])
            .header(CLIENT_ID_HEADER, self.client_id.as_str())
            .header(CLIENT_SECRET_HEADER, self.client_secret.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body: BlogResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Payload(e.to_string()))?;

        Ok(body
            .items
            .into_iter()
            .map(|item| BlogPost {
                title: self.strip_tags(&item.title),
                link: item.link,
                blogger: item.blogger,
                posted: item.posted,
                summary: self.strip_tags(&item.description),
            })
            .collect())
    }

    fn strip_tags(&self, text: &str) -> String {
        self.tag.replace_all(text, "").into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BlogSearchClient {
        let config = SearchConfig {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            ..SearchConfig::default()
        };
        BlogSearchClient::new(&config).unwrap()
    }

    #[test]
    fn test_strip_tags_removes_markup() {
        let client = client();
        assert_eq!(
            client.strip_tags("Best <b>Busan</b> seafood <i>spots</i>"),
            "Best Busan seafood spots"
        );
    }

    #[test]
    fn test_strip_tags_leaves_plain_text_alone() {
        let client = client();
        assert_eq!(client.strip_tags("no markup here"), "no markup here");
    }
}
