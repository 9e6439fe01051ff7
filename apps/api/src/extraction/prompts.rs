// Prompt constants for job extraction.
// The JSON-only system prompt comes from llm_client::prompts.

/// Job extraction prompt template. Replace `{page_text}` before sending.
pub const EXTRACT_PROMPT_TEMPLATE: &str = r#"### SCRAPED TEXT FROM WEBSITE:
{page_text}

The scraped text is from a careers page.
Extract all job postings and return them as a JSON array.
Each job posting must contain these keys:
- "role": job title
- "experience": required years of experience
- "skills": list of skills with context
- "description": summary of the job, including key responsibilities and requirements

Only return valid JSON. Do NOT include any explanation, extra text, or commentary.
If a field is missing in the source, set it to null.

### VALID JSON (NO PREAMBLE):"#;
