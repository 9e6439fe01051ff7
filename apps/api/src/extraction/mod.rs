//! Job extraction — turns scraped careers-page text into validated job postings.
//!
//! One model call per page, deterministic post-processing, no internal retry.
//! Retry policy, if any, belongs to the caller.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::prompts::EXTRACT_PROMPT_TEMPLATE;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{strip_json_fences, TextModel};

pub mod prompts;

/// One structured job posting extracted from page text.
///
/// Constructed only through the validating parser below — `skills` is always
/// a vector, never a bare string or null, so downstream joins cannot fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub role: Option<String>,
    pub experience: Option<String>,
    pub skills: Vec<String>,
    pub description: Option<String>,
}

/// Extracts all job postings from raw page text.
///
/// The model is instructed to return a JSON array with the keys `role`,
/// `experience`, `skills`, `description`, nulls for missing fields, and no
/// surrounding commentary. A lone object (single job found) is normalized
/// into a one-element list rather than rejected. Unparseable output surfaces
/// as `ExtractionParse`; a record violating the shape contract surfaces as
/// `MalformedJob`. Postings are never silently dropped.
pub async fn extract_jobs(
    page_text: &str,
    model: &dyn TextModel,
) -> Result<Vec<JobPosting>, AppError> {
    if page_text.trim().is_empty() {
        return Err(AppError::Validation(
            "page_text must not be empty".to_string(),
        ));
    }

    let prompt = EXTRACT_PROMPT_TEMPLATE.replace("{page_text}", page_text);
    let raw = model
        .complete(&prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Job extraction call failed: {e}")))?;

    let value: Value = serde_json::from_str(strip_json_fences(&raw)).map_err(|_| {
        AppError::ExtractionParse("Context too big. Unable to parse job postings.".to_string())
    })?;

    let elements = match value {
        Value::Array(items) => items,
        obj @ Value::Object(_) => vec![obj],
        other => {
            return Err(AppError::ExtractionParse(format!(
                "Expected a JSON array of job postings, got {}",
                json_type_name(&other)
            )))
        }
    };

    let mut jobs = Vec::with_capacity(elements.len());
    for element in &elements {
        jobs.push(parse_posting(element)?);
    }

    debug!("Extracted {} job posting(s)", jobs.len());
    Ok(jobs)
}

/// Validates one raw record against the output contract.
///
/// `skills` missing or null is normalized to an empty vector; any other
/// non-array shape is a contract violation caught here, before prompt
/// rendering ever joins the list.
fn parse_posting(value: &Value) -> Result<JobPosting, AppError> {
    let record = value.as_object().ok_or_else(|| {
        AppError::MalformedJob(format!(
            "Job record must be a JSON object, got {}",
            json_type_name(value)
        ))
    })?;

    let skills = match record.get("skills") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(scalar_text).collect(),
        Some(other) => {
            return Err(AppError::MalformedJob(format!(
                "`skills` must be an array, got {}",
                json_type_name(other)
            )))
        }
    };

    Ok(JobPosting {
        role: optional_text(record.get("role")),
        experience: optional_text(record.get("experience")),
        skills,
        description: optional_text(record.get("description")),
    })
}

/// Missing and null collapse to `None`; strings pass through; other scalars
/// keep their JSON rendering (a bare `5` becomes `"5"`).
fn optional_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(scalar_text(v)),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
