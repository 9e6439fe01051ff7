//! Outreach pipeline — extract postings, match portfolio projects, compose
//! one email per posting.
//!
//! Flow: extract_jobs → per job: match_projects → compose_email.
//! An extraction failure aborts the whole page batch with its diagnostic. A
//! single job's match or composition failure is recorded in `failures` and
//! the remaining jobs still complete — each job is independent.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::composer::{compose_email, Persona};
use crate::errors::AppError;
use crate::extraction::{extract_jobs, JobPosting};
use crate::llm_client::TextModel;
use crate::matching::match_projects;
use crate::portfolio::index::PortfolioIndex;
use crate::portfolio::PortfolioProject;

pub mod handlers;

#[derive(Debug, Deserialize)]
pub struct OutreachRequest {
    pub page_text: String,
}

/// One job's finished outreach: the posting, the projects grounding the
/// email, and the email text itself.
#[derive(Debug, Serialize)]
pub struct JobOutreach {
    pub job: JobPosting,
    pub matched_projects: Vec<PortfolioProject>,
    pub email: String,
}

/// A job whose email could not be produced. The batch continues without it.
#[derive(Debug, Serialize)]
pub struct OutreachFailure {
    pub role: Option<String>,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct OutreachResponse {
    pub outreach: Vec<JobOutreach>,
    pub failures: Vec<OutreachFailure>,
}

/// Runs the full pipeline for one scraped page.
pub async fn generate_outreach(
    page_text: &str,
    model: &dyn TextModel,
    index: &PortfolioIndex,
    persona: &Persona,
) -> Result<OutreachResponse, AppError> {
    let jobs = extract_jobs(page_text, model).await?;
    info!("Extracted {} job posting(s) from page text", jobs.len());

    let mut outreach = Vec::with_capacity(jobs.len());
    let mut failures = Vec::new();

    for job in jobs {
        match outreach_for_job(&job, model, index, persona).await {
            Ok(item) => outreach.push(item),
            Err(e) => {
                warn!("Skipping email for role {:?}: {e}", job.role);
                failures.push(OutreachFailure {
                    role: job.role.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(OutreachResponse { outreach, failures })
}

async fn outreach_for_job(
    job: &JobPosting,
    model: &dyn TextModel,
    index: &PortfolioIndex,
    persona: &Persona,
) -> Result<JobOutreach, AppError> {
    let matched_projects = match_projects(&job.skills, index).await?;
    let email = compose_email(job, &matched_projects, model, persona).await?;
    Ok(JobOutreach {
        job: job.clone(),
        matched_projects,
        email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::portfolio::index::{IndexError, VectorIndex};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Test double that replays a scripted sequence of responses, one per
    /// model call, in order.
    struct ScriptedModel {
        responses: Mutex<VecDeque<Result<String, LlmError>>>,
    }

    impl ScriptedModel {
        fn new(responses: Vec<Result<String, LlmError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    #[async_trait]
    impl TextModel for ScriptedModel {
        async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected model call")
        }
    }

    /// Engine double returning the same stored payloads for every text.
    struct StubEngine {
        matches: Vec<PortfolioProject>,
    }

    #[async_trait]
    impl VectorIndex for StubEngine {
        async fn add(
            &self,
            _documents: &[String],
            _metadatas: &[PortfolioProject],
            _ids: &[String],
        ) -> Result<(), IndexError> {
            Ok(())
        }

        async fn query(
            &self,
            texts: &[String],
            _n_results: usize,
        ) -> Result<Vec<Vec<PortfolioProject>>, IndexError> {
            Ok(texts.iter().map(|_| self.matches.clone()).collect())
        }

        async fn count(&self) -> Result<u64, IndexError> {
            Ok(0)
        }
    }

    async fn loaded_index(matches: Vec<PortfolioProject>) -> PortfolioIndex {
        let index = PortfolioIndex::new(Arc::new(StubEngine { matches }));
        index.load(&[]).await.unwrap();
        index
    }

    fn persona() -> Persona {
        Persona {
            sender_name: "Sravya".to_string(),
            portfolio_url: "https://example.portfolio.com".to_string(),
        }
    }

    const TWO_JOBS: &str = r#"[
        {"role": "Rust Engineer", "experience": "5 years", "skills": ["rust"], "description": "Build"},
        {"role": "Data Engineer", "experience": "3 years", "skills": ["python"], "description": "Pipelines"}
    ]"#;

    #[tokio::test]
    async fn test_each_job_gets_an_email() {
        let model = ScriptedModel::new(vec![
            Ok(TWO_JOBS.to_string()),
            Ok("email one".to_string()),
            Ok("email two".to_string()),
        ]);
        let index = loaded_index(vec![PortfolioProject {
            project_name: "Chat Bot".to_string(),
            url: "https://x/1".to_string(),
            description: String::new(),
        }])
        .await;

        let response = generate_outreach("page", &model, &index, &persona())
            .await
            .unwrap();

        assert_eq!(response.outreach.len(), 2);
        assert!(response.failures.is_empty());
        assert_eq!(response.outreach[0].email, "email one");
        assert_eq!(response.outreach[1].job.role.as_deref(), Some("Data Engineer"));
        assert_eq!(response.outreach[0].matched_projects[0].url, "https://x/1");
    }

    #[tokio::test]
    async fn test_one_failed_composition_does_not_abort_the_batch() {
        let model = ScriptedModel::new(vec![
            Ok(TWO_JOBS.to_string()),
            Err(LlmError::EmptyContent),
            Ok("email two".to_string()),
        ]);
        let index = loaded_index(vec![]).await;

        let response = generate_outreach("page", &model, &index, &persona())
            .await
            .unwrap();

        assert_eq!(response.outreach.len(), 1);
        assert_eq!(response.outreach[0].email, "email two");
        assert_eq!(response.failures.len(), 1);
        assert_eq!(response.failures[0].role.as_deref(), Some("Rust Engineer"));
    }

    #[tokio::test]
    async fn test_extraction_failure_aborts_the_batch() {
        let model = ScriptedModel::new(vec![Ok("not json at all".to_string())]);
        let index = loaded_index(vec![]).await;

        let err = generate_outreach("page", &model, &index, &persona())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ExtractionParse(_)));
    }
}
