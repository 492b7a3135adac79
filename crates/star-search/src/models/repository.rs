use serde::{Deserialize, Serialize};

/// Repository owner (minimal representation)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubOwner {
    pub login: String,
}

/// One entry of the `items` list returned by `/search/repositories`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubRepository {
    pub name: String,
    pub html_url: String,
    pub owner: GitHubOwner,
    pub stargazers_count: u64,
    #[serde(default)]
    pub description: Option<String>,
}

/// A repository as the chart sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositorySummary {
    pub name: String,
    pub url: String,
    pub owner: String,
    pub stars: u64,
    pub description: Option<String>,
}

impl RepositorySummary {
    /// Description text, or the placeholder when missing or blank
    pub fn description_or_placeholder(&self) -> &str {
        match self.description.as_deref() {
            Some(desc) if !desc.is_empty() => desc,
            _ => crate::extract::NO_DESCRIPTION,
        }
    }
}

impl From<GitHubRepository> for RepositorySummary {
    fn from(repo: GitHubRepository) -> Self {
        Self {
            name: repo.name,
            url: repo.html_url,
            owner: repo.owner.login,
            stars: repo.stargazers_count,
            description: repo.description,
        }
    }
}

/// Repositories from one search page, in the order the API returned them
/// (descending star count when sorted by stars).
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResult {
    pub total_count: Option<u64>,
    pub repositories: Vec<RepositorySummary>,
}

impl SearchResult {
    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}
