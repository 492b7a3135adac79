use serde::Serialize;

use super::repository::{RepositorySummary, SearchResult};

/// Axis label for one bar: the repository name linking to its page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoLink {
    pub name: String,
    pub url: String,
}

impl RepoLink {
    /// Anchor-style label, e.g. `<a href='https://x/foo'>foo</a>`
    pub fn to_anchor(&self) -> String {
        format!("<a href='{}'>{}</a>", self.url, self.name)
    }
}

/// The three aligned sequences that drive the chart.
///
/// Index `i` of `labels`, `stars` and `hover` always describes the same
/// repository. Fields are private so the lengths cannot drift apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    labels: Vec<RepoLink>,
    stars: Vec<u64>,
    hover: Vec<String>,
}

impl ChartSeries {
    /// Flatten repositories into parallel sequences, preserving order
    pub fn from_repositories<'a, I>(repos: I) -> Self
    where
        I: IntoIterator<Item = &'a RepositorySummary>,
    {
        let mut series = ChartSeries::default();
        for repo in repos {
            series.labels.push(RepoLink {
                name: repo.name.clone(),
                url: repo.url.clone(),
            });
            series.stars.push(repo.stars);
            series
                .hover
                .push(format!("{}<br />{}", repo.owner, repo.description_or_placeholder()));
        }
        series
    }

    pub fn labels(&self) -> &[RepoLink] {
        &self.labels
    }

    pub fn stars(&self) -> &[u64] {
        &self.stars
    }

    pub fn hover(&self) -> &[String] {
        &self.hover
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Highest star count, 0 for an empty series
    pub fn max_stars(&self) -> u64 {
        self.stars.iter().copied().max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RepoLink, u64, &str)> + '_ {
        self.labels
            .iter()
            .zip(self.stars.iter().copied())
            .zip(self.hover.iter().map(String::as_str))
            .map(|((label, stars), hover)| (label, stars, hover))
    }
}

impl From<&SearchResult> for ChartSeries {
    fn from(result: &SearchResult) -> Self {
        ChartSeries::from_repositories(&result.repositories)
    }
}
