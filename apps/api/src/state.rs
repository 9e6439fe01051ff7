use std::sync::Arc;

use crate::composer::Persona;
use crate::llm_client::TextModel;
use crate::portfolio::index::PortfolioIndex;
use crate::portfolio::PortfolioRow;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generative-model capability. Trait object so tests inject doubles.
    pub model: Arc<dyn TextModel>,
    /// Skill-embedding index. Loaded in `main` before the server starts;
    /// read-only afterwards, safe for concurrent queries.
    pub index: Arc<PortfolioIndex>,
    /// Portfolio rows as read from the tabular source.
    pub projects: Arc<Vec<PortfolioRow>>,
    pub persona: Persona,
}
