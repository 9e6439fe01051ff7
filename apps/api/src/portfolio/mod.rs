//! Portfolio source data and the skill-embedding index built over it.

pub mod chroma;
pub mod index;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One row of the tabular portfolio source, read once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioRow {
    #[serde(rename = "Project_name")]
    pub project_name: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Description")]
    pub description: String,
    /// Comma-space-delimited skill phrases, split at index load time.
    #[serde(rename = "Skills")]
    pub skills: String,
}

/// Index entry payload and match result. Identity is the `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioProject {
    pub project_name: String,
    pub url: String,
    pub description: String,
}

impl PortfolioRow {
    /// Payload stored on every skill entry indexed for this row.
    pub fn project(&self) -> PortfolioProject {
        PortfolioProject {
            project_name: self.project_name.clone(),
            url: self.url.clone(),
            description: self.description.clone(),
        }
    }

    /// Skill phrases as indexed, split on the fixed `", "` delimiter.
    pub fn skill_phrases(&self) -> Vec<String> {
        self.skills.split(", ").map(str::to_string).collect()
    }
}

/// Reads the portfolio CSV. Called once from `main`, before the index loads.
pub fn load_rows(path: &Path) -> Result<Vec<PortfolioRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open portfolio source {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: PortfolioRow = record.context("Malformed portfolio row")?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_rows_parses_headers_and_fields() {
        let file = write_csv(
            "Project_name,URL,Description,Skills\n\
             Chat Bot,https://x/1,Conversational assistant,\"python, nlp\"\n\
             Rate Limiter,https://x/2,Token bucket service,\"rust, redis\"\n",
        );

        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].project_name, "Chat Bot");
        assert_eq!(rows[0].url, "https://x/1");
        assert_eq!(rows[1].skills, "rust, redis");
    }

    #[test]
    fn test_skill_phrases_split_on_comma_space() {
        let row = PortfolioRow {
            project_name: "Chat Bot".to_string(),
            url: "https://x/1".to_string(),
            description: "Conversational assistant".to_string(),
            skills: "python, nlp, prompt engineering".to_string(),
        };
        assert_eq!(row.skill_phrases(), vec!["python", "nlp", "prompt engineering"]);
    }

    #[test]
    fn test_project_payload_carries_row_metadata() {
        let row = PortfolioRow {
            project_name: "Chat Bot".to_string(),
            url: "https://x/1".to_string(),
            description: "Conversational assistant".to_string(),
            skills: "python".to_string(),
        };
        let project = row.project();
        assert_eq!(project.project_name, "Chat Bot");
        assert_eq!(project.url, "https://x/1");
        assert_eq!(project.description, "Conversational assistant");
    }

    #[test]
    fn test_load_rows_missing_file_is_an_error() {
        let err = load_rows(Path::new("/nonexistent/portfolio.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open portfolio source"));
    }
}
