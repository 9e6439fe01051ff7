//! Project matching — resolves a job's skill list to the portfolio projects
//! cited in its email.

use std::collections::HashSet;

use crate::errors::AppError;
use crate::portfolio::index::PortfolioIndex;
use crate::portfolio::PortfolioProject;

/// Nearest index entries requested per skill.
pub const QUERY_TOP_K: usize = 3;
/// Upper bound on projects cited in one email.
pub const MAX_MATCHED_PROJECTS: usize = 4;

/// Queries the index once per job (all skills in one batch) and merges the
/// per-skill results. An empty skill list issues no query at all; a skill
/// with no matches contributes nothing.
pub async fn match_projects(
    skills: &[String],
    index: &PortfolioIndex,
) -> Result<Vec<PortfolioProject>, AppError> {
    if skills.is_empty() {
        return Ok(Vec::new());
    }
    let per_skill = index.query(skills, QUERY_TOP_K).await?;
    Ok(merge_matches(per_skill))
}

/// Flattens per-skill query results preserving skill order then intra-result
/// order, drops url duplicates (first occurrence wins), and caps the result
/// at `MAX_MATCHED_PROJECTS`.
pub fn merge_matches(per_skill: Vec<Vec<PortfolioProject>>) -> Vec<PortfolioProject> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::new();

    for results in per_skill {
        for project in results {
            if merged.len() == MAX_MATCHED_PROJECTS {
                return merged;
            }
            if seen.insert(project.url.clone()) {
                merged.push(project);
            }
        }
    }
    merged
}
