//! Flattening of a search response into chart series.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, SearchError};
use crate::models::{ChartSeries, GitHubRepository, RepositorySummary, SearchResult};

/// Stands in for a null, missing or empty description
pub const NO_DESCRIPTION: &str = "No description provided.";

/// Parse the decoded search body into a [`SearchResult`].
///
/// Fails on the first missing or mistyped field; never returns partial data.
pub fn parse_search_result(body: &Value) -> Result<SearchResult> {
    let items = body
        .get("items")
        .ok_or_else(|| SearchError::MalformedResponse("missing `items` field".to_string()))?
        .as_array()
        .ok_or_else(|| SearchError::MalformedResponse("`items` is not a list".to_string()))?;

    let repositories = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            GitHubRepository::deserialize(item)
                .map(RepositorySummary::from)
                .map_err(|e| SearchError::MalformedResponse(format!("item {}: {}", index, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    let total_count = body.get("total_count").and_then(Value::as_u64);
    debug!(count = repositories.len(), ?total_count, "parsed search result");

    Ok(SearchResult {
        total_count,
        repositories,
    })
}

/// Parse and flatten in one step
pub fn extract_series(body: &Value) -> Result<ChartSeries> {
    let result = parse_search_result(body)?;
    Ok(ChartSeries::from(&result))
}
