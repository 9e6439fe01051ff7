//! Chroma-backed `VectorIndex` — HTTP client for the Chroma REST API.
//!
//! The server owns embedding and distance; this client only ships documents
//! and payloads. The backend is a config-time choice (base URL + collection
//! name), resolved once at startup.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::portfolio::index::{IndexError, VectorIndex};
use crate::portfolio::PortfolioProject;

const API_BASE: &str = "api/v1";

#[derive(Debug, Deserialize)]
struct CollectionResponse {
    id: String,
}

#[derive(Debug, Serialize)]
struct AddRequest<'a> {
    ids: &'a [String],
    documents: &'a [String],
    metadatas: &'a [PortfolioProject],
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query_texts: &'a [String],
    n_results: usize,
    include: [&'static str; 1],
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    metadatas: Vec<Vec<PortfolioProject>>,
}

pub struct ChromaIndex {
    client: Client,
    base_url: String,
    collection_id: String,
}

impl ChromaIndex {
    /// Connects to a Chroma server and resolves (or creates) the collection.
    pub async fn connect(base_url: &str, collection: &str) -> Result<Self, IndexError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to build HTTP client");

        let base_url = base_url.trim_end_matches('/').to_string();
        let response = client
            .post(format!("{base_url}/{API_BASE}/collections"))
            .json(&json!({"name": collection, "get_or_create": true}))
            .send()
            .await?;
        let response = check_status(response).await?;
        let resolved: CollectionResponse = response.json().await?;

        info!("Connected to Chroma collection '{collection}' ({})", resolved.id);
        Ok(Self {
            client,
            base_url,
            collection_id: resolved.id,
        })
    }

    fn collection_url(&self, op: &str) -> String {
        format!(
            "{}/{API_BASE}/collections/{}/{op}",
            self.base_url, self.collection_id
        )
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, IndexError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(IndexError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl VectorIndex for ChromaIndex {
    async fn add(
        &self,
        documents: &[String],
        metadatas: &[PortfolioProject],
        ids: &[String],
    ) -> Result<(), IndexError> {
        let response = self
            .client
            .post(self.collection_url("add"))
            .json(&AddRequest {
                ids,
                documents,
                metadatas,
            })
            .send()
            .await?;
        check_status(response).await?;

        debug!("Indexed {} skill entries", documents.len());
        Ok(())
    }

    async fn query(
        &self,
        texts: &[String],
        n_results: usize,
    ) -> Result<Vec<Vec<PortfolioProject>>, IndexError> {
        let response = self
            .client
            .post(self.collection_url("query"))
            .json(&QueryRequest {
                query_texts: texts,
                n_results,
                include: ["metadatas"],
            })
            .send()
            .await?;
        let response = check_status(response).await?;
        let parsed: QueryResponse = response.json().await?;
        Ok(parsed.metadatas)
    }

    async fn count(&self) -> Result<u64, IndexError> {
        let response = self
            .client
            .get(self.collection_url("count"))
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}
