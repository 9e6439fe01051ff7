// Prompt constants for email composition.

/// System prompt for email composition — plain text out, nothing else.
pub const EMAIL_SYSTEM: &str = "You are a job applicant writing a professional, \
    personalized cold email. \
    Respond with the email body only, as plain text. \
    Do NOT include any preamble, commentary, subject line, or markdown.";

/// Email prompt template.
/// Replace: {sender_name}, {job_description}, {project_lines}, {portfolio_url}
pub const EMAIL_PROMPT_TEMPLATE: &str = r#"### JOB DESCRIPTION:
{job_description}

### INSTRUCTION:
You are {sender_name}, applying for the job above. Write a professional, concise, and personalized cold email
highlighting your skills and experience relevant to the job.

Include the most relevant projects from the following portfolio projects,
formatting each on its own line as: ProjectName : URL
{project_lines}

Also include this portfolio link at the end of the mail: {portfolio_url}
Keep the email within 200-250 words.
Do not include any preamble, extra text, or commentary.

### EMAIL (NO PREAMBLE):"#;
