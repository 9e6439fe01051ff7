//! Email composition — renders the persona prompt and drafts one cold email
//! per job posting.
//!
//! The word-count and no-preamble instructions are advisory: the model's
//! text is returned verbatim, with no post-hoc length or format validation.

use tracing::debug;

use crate::composer::prompts::{EMAIL_PROMPT_TEMPLATE, EMAIL_SYSTEM};
use crate::errors::AppError;
use crate::extraction::JobPosting;
use crate::llm_client::TextModel;
use crate::portfolio::PortfolioProject;

pub mod prompts;

/// Sender identity and closing link baked into every email prompt.
#[derive(Debug, Clone)]
pub struct Persona {
    pub sender_name: String,
    pub portfolio_url: String,
}

/// Drafts the cold email for one job and its matched projects.
/// One model call; pure apart from it.
pub async fn compose_email(
    job: &JobPosting,
    matched: &[PortfolioProject],
    model: &dyn TextModel,
    persona: &Persona,
) -> Result<String, AppError> {
    let prompt = EMAIL_PROMPT_TEMPLATE
        .replace("{sender_name}", &persona.sender_name)
        .replace("{job_description}", &format_job_block(job))
        .replace("{project_lines}", &format_project_lines(matched))
        .replace("{portfolio_url}", &persona.portfolio_url);

    let email = model
        .complete(&prompt, EMAIL_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Email composition call failed: {e}")))?;

    debug!("Composed email for role {:?}", job.role);
    Ok(email)
}

/// Renders the job block for the prompt. `skills` is a vector by
/// construction, so the join can never see null.
fn format_job_block(job: &JobPosting) -> String {
    format!(
        "Role: {}\nSkills: {}\nDescription: {}",
        job.role.as_deref().unwrap_or("unspecified"),
        job.skills.join(", "),
        job.description.as_deref().unwrap_or("unspecified"),
    )
}

/// One `name: url` line per matched project.
fn format_project_lines(matched: &[PortfolioProject]) -> String {
    matched
        .iter()
        .map(|p| format!("{}: {}", p.project_name, p.url))
        .collect::<Vec<_>>()
        .join("\n")
}
