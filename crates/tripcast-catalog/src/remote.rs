//! Remotely loaded region catalog.
//!
//! The forecast office publishes its region tree as a JSON document of
//! `{ local, children }` nodes down to neighborhood level. The loader walks
//! the tree depth-first, so the catalog order is the document order.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::region::{CatalogError, Region, RegionCatalog};

const REGION_TREE_URLS: [&str; 2] = [
    "https://www.weather.go.kr/DFSROOT/POINT/DATA/top.json.txt",
    "http://www.weather.go.kr/DFSROOT/POINT/DATA/top.json.txt",
];
const REQUEST_TIMEOUT_SECS: u64 = 5;
// The endpoint rejects requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

#[derive(Debug, Deserialize)]
struct RegionNode {
    local: Option<String>,
    #[serde(default)]
    children: Vec<RegionNode>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RegionTree {
    Many(Vec<RegionNode>),
    One(RegionNode),
}

/// Fetches and flattens the remote region tree into a [`RegionCatalog`].
#[derive(Debug, Clone)]
pub struct RegionTreeLoader {
    client: Arc<Client>,
    urls: Vec<String>,
}

impl RegionTreeLoader {
    /// Loader for the well-known endpoints, HTTPS first with HTTP fallback.
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_urls(REGION_TREE_URLS.iter().map(ToString::to_string).collect())
    }

    pub fn with_urls(urls: Vec<String>) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CatalogError::Load(e.to_string()))?;
        Ok(Self {
            client: Arc::new(client),
            urls,
        })
    }

    /// Try each endpoint in turn; the first parseable response wins.
    pub async fn load(&self) -> Result<RegionCatalog, CatalogError> {
        for url in &self.urls {
            match self.try_load(url).await {
                Ok(catalog) => {
                    tracing::info!("Loaded {} regions from {}", catalog.len(), url);
                    return Ok(catalog);
                }
                Err(e) => {
                    tracing::warn!("Region tree fetch from {} failed: {}", url, e);
                }
            }
        }
        Err(CatalogError::Load(
            "no region tree endpoint was reachable".to_string(),
        ))
    }

    async fn try_load(&self, url: &str) -> Result<RegionCatalog, CatalogError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::Load(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Load(format!("status {status}")));
        }

        // Served as text/plain despite the JSON payload, so parse from text.
        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Load(e.to_string()))?;
        let tree: RegionTree =
            serde_json::from_str(&body).map_err(|e| CatalogError::Load(e.to_string()))?;

        let mut regions = Vec::new();
        match tree {
            RegionTree::One(node) => collect(&node, &mut regions),
            RegionTree::Many(nodes) => {
                for node in &nodes {
                    collect(node, &mut regions);
                }
            }
        }

        if regions.is_empty() {
            return Err(CatalogError::Load("region tree was empty".to_string()));
        }
        Ok(RegionCatalog::new(regions))
    }
}

fn collect(node: &RegionNode, out: &mut Vec<Region>) {
    if let Some(name) = node.local.as_deref() {
        if !name.is_empty() {
            out.push(Region::named(name));
        }
    }
    for child in &node.children {
        collect(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_walks_depth_first() {
        let tree = RegionNode {
            local: Some("Seoul".into()),
            children: vec![
                RegionNode {
                    local: Some("Jongno-gu".into()),
                    children: vec![RegionNode {
                        local: Some("Sajik-dong".into()),
                        children: vec![],
                    }],
                },
                RegionNode {
                    local: Some("Jung-gu".into()),
                    children: vec![],
                },
            ],
        };

        let mut regions = Vec::new();
        collect(&tree, &mut regions);
        let names: Vec<&str> = regions.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Seoul", "Jongno-gu", "Sajik-dong", "Jung-gu"]);
    }

    #[test]
    fn test_collect_skips_unnamed_nodes() {
        let tree = RegionNode {
            local: None,
            children: vec![RegionNode {
                local: Some("Busan".into()),
                children: vec![],
            }],
        };

        let mut regions = Vec::new();
        collect(&tree, &mut regions);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].name, "Busan");
    }
}
