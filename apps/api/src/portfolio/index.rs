//! The skill-embedding index — idempotent population plus per-skill
//! similarity queries. Each indexed entry is one skill phrase carrying its
//! parent project's full payload, so a hit on any skill resolves directly to
//! the project.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::portfolio::{PortfolioProject, PortfolioRow};

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// The vector-index engine seam. Embedding and distance metric live behind
/// it; this side only moves documents and payloads.
///
/// Held as `Arc<dyn VectorIndex>` so unit tests can substitute an in-memory
/// double for the Chroma client.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn add(
        &self,
        documents: &[String],
        metadatas: &[PortfolioProject],
        ids: &[String],
    ) -> Result<(), IndexError>;

    /// One nearest-neighbor search per input text, each capped at `n_results`
    /// entries, payloads returned in input order.
    async fn query(
        &self,
        texts: &[String],
        n_results: usize,
    ) -> Result<Vec<Vec<PortfolioProject>>, IndexError>;

    async fn count(&self) -> Result<u64, IndexError>;
}

/// Read-mostly wrapper over the engine: populated once at startup, then
/// queried concurrently without locking.
pub struct PortfolioIndex {
    engine: Arc<dyn VectorIndex>,
    loaded: AtomicBool,
}

impl PortfolioIndex {
    pub fn new(engine: Arc<dyn VectorIndex>) -> Self {
        Self {
            engine,
            loaded: AtomicBool::new(false),
        }
    }

    /// Populates the index from the portfolio rows.
    ///
    /// Idempotent: if this instance already loaded, or the engine reports
    /// existing entries, nothing is added. Must complete before any `query`.
    pub async fn load(&self, rows: &[PortfolioRow]) -> Result<(), AppError> {
        if self.loaded.load(Ordering::Acquire) {
            return Ok(());
        }

        let existing = self.engine.count().await.map_err(index_err)?;
        if existing > 0 {
            info!("Portfolio index already populated ({existing} entries), skipping load");
            self.loaded.store(true, Ordering::Release);
            return Ok(());
        }

        for row in rows {
            let documents = row.skill_phrases();
            let metadatas = vec![row.project(); documents.len()];
            let ids: Vec<String> = documents
                .iter()
                .map(|_| Uuid::new_v4().to_string())
                .collect();
            self.engine
                .add(&documents, &metadatas, &ids)
                .await
                .map_err(index_err)?;
        }

        info!("Portfolio index loaded from {} project(s)", rows.len());
        self.loaded.store(true, Ordering::Release);
        Ok(())
    }

    /// One similarity search per skill text, results in input order.
    ///
    /// Fails explicitly when called before `load` completes — a silent empty
    /// result would be indistinguishable from "no matches". An empty input
    /// issues no engine call and returns an empty sequence.
    pub async fn query(
        &self,
        skill_texts: &[String],
        top_k: usize,
    ) -> Result<Vec<Vec<PortfolioProject>>, AppError> {
        if !self.loaded.load(Ordering::Acquire) {
            return Err(AppError::IndexNotLoaded);
        }
        if skill_texts.is_empty() {
            return Ok(Vec::new());
        }
        self.engine
            .query(skill_texts, top_k)
            .await
            .map_err(index_err)
    }
}

fn index_err(e: IndexError) -> AppError {
    AppError::Index(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    /// In-memory engine double. `query` matches a text against stored
    /// documents by equality — enough to exercise the wiring without an
    /// embedding model.
    #[derive(Default)]
    struct FakeEngine {
        entries: Mutex<Vec<(String, PortfolioProject, String)>>,
        add_calls: AtomicUsize,
        query_calls: AtomicUsize,
    }

    #[async_trait]
    impl VectorIndex for FakeEngine {
        async fn add(
            &self,
            documents: &[String],
            metadatas: &[PortfolioProject],
            ids: &[String],
        ) -> Result<(), IndexError> {
            self.add_calls.fetch_add(1, Ordering::SeqCst);
            let mut entries = self.entries.lock().unwrap();
            for ((doc, meta), id) in documents.iter().zip(metadatas).zip(ids) {
                entries.push((doc.clone(), meta.clone(), id.clone()));
            }
            Ok(())
        }

        async fn query(
            &self,
            texts: &[String],
            n_results: usize,
        ) -> Result<Vec<Vec<PortfolioProject>>, IndexError> {
            self.query_calls.fetch_add(1, Ordering::SeqCst);
            let entries = self.entries.lock().unwrap();
            Ok(texts
                .iter()
                .map(|text| {
                    entries
                        .iter()
                        .filter(|(doc, _, _)| doc == text)
                        .take(n_results)
                        .map(|(_, meta, _)| meta.clone())
                        .collect()
                })
                .collect())
        }

        async fn count(&self) -> Result<u64, IndexError> {
            Ok(self.entries.lock().unwrap().len() as u64)
        }
    }

    fn chat_bot_row() -> PortfolioRow {
        PortfolioRow {
            project_name: "Chat Bot".to_string(),
            url: "https://x/1".to_string(),
            description: "Conversational assistant".to_string(),
            skills: "python, nlp".to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_indexes_one_entry_per_skill_phrase() {
        let engine = Arc::new(FakeEngine::default());
        let index = PortfolioIndex::new(engine.clone());

        index.load(&[chat_bot_row()]).await.unwrap();

        let entries = engine.entries.lock().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "python");
        assert_eq!(entries[1].0, "nlp");
        // Every entry carries the full project payload
        assert!(entries.iter().all(|(_, meta, _)| meta.url == "https://x/1"));
        // Fresh unique id per entry
        assert_ne!(entries[0].2, entries[1].2);
    }

    #[tokio::test]
    async fn test_load_twice_performs_zero_additional_adds() {
        let engine = Arc::new(FakeEngine::default());
        let index = PortfolioIndex::new(engine.clone());

        index.load(&[chat_bot_row()]).await.unwrap();
        index.load(&[chat_bot_row()]).await.unwrap();

        assert_eq!(engine.add_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_load_skips_engine_already_populated_elsewhere() {
        let engine = Arc::new(FakeEngine::default());
        engine
            .add(
                &["python".to_string()],
                &[chat_bot_row().project()],
                &["seed".to_string()],
            )
            .await
            .unwrap();

        // New instance, same engine: count() guard must prevent re-indexing
        let index = PortfolioIndex::new(engine.clone());
        index.load(&[chat_bot_row()]).await.unwrap();

        assert_eq!(engine.add_calls.load(Ordering::SeqCst), 1);
        assert_eq!(engine.entries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_query_before_load_fails_explicitly() {
        let index = PortfolioIndex::new(Arc::new(FakeEngine::default()));
        let err = index
            .query(&["python".to_string()], 3)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::IndexNotLoaded));
    }

    #[tokio::test]
    async fn test_empty_input_returns_empty_without_engine_call() {
        let engine = Arc::new(FakeEngine::default());
        let index = PortfolioIndex::new(engine.clone());
        index.load(&[]).await.unwrap();

        let results = index.query(&[], 3).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(engine.query_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_query_returns_project_metadata_for_matching_skill() {
        let engine = Arc::new(FakeEngine::default());
        let index = PortfolioIndex::new(engine);
        index.load(&[chat_bot_row()]).await.unwrap();

        let results = index.query(&["python".to_string()], 3).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].len(), 1);
        assert_eq!(results[0][0].project_name, "Chat Bot");
        assert_eq!(results[0][0].url, "https://x/1");
    }
}
