use crate::cli::OutputFormat;
use colored::Colorize;
use serde::Serialize;
use star_search::ChartSeries;
use std::path::Path;

#[derive(Serialize)]
pub struct JsonError {
    pub error: bool,
    pub code: String,
    pub message: String,
}

pub fn output_error(err: &anyhow::Error, format: OutputFormat) {
    let message = match format {
        OutputFormat::Json => {
            let json_err = JsonError {
                error: true,
                code: error_code(err).to_string(),
                message: format!("{:#}", err),
            };
            serde_json::to_string_pretty(&json_err).unwrap_or_else(|_| {
                format!(r#"{{"error": true, "message": "{}"}}"#, err)
            })
        }
        OutputFormat::Text => format!("{}: {:#}", "Error".red().bold(), err),
    };
    eprintln!("{}", message);
}

/// Stable code for scripted callers, derived from the root cause
fn error_code(err: &anyhow::Error) -> &'static str {
    use star_chart::ChartError;
    use star_search::SearchError;

    if let Some(search) = err.downcast_ref::<SearchError>() {
        return match search {
            SearchError::Request { .. } | SearchError::Transport(_) => "request_error",
            SearchError::MalformedResponse(_) => "malformed_response",
            SearchError::InvalidQuery(_) => "invalid_query",
        };
    }
    if err.downcast_ref::<ChartError>().is_some() {
        return "chart_error";
    }
    "error"
}

/// One charted repository, as printed in the summary
#[derive(Serialize)]
pub struct RankedRepository<'a> {
    pub rank: usize,
    pub name: &'a str,
    pub url: &'a str,
    pub stars: u64,
    pub hover: &'a str,
}

#[derive(Serialize)]
pub struct ChartSummary<'a> {
    pub language: &'a str,
    pub title: &'a str,
    pub chart_path: String,
    pub repositories: Vec<RankedRepository<'a>>,
}

impl<'a> ChartSummary<'a> {
    pub fn new(language: &'a str, title: &'a str, chart_path: &Path, series: &'a ChartSeries) -> Self {
        let repositories = series
            .iter()
            .enumerate()
            .map(|(i, (label, stars, hover))| RankedRepository {
                rank: i + 1,
                name: &label.name,
                url: &label.url,
                stars,
                hover,
            })
            .collect();

        Self {
            language,
            title,
            chart_path: chart_path.display().to_string(),
            repositories,
        }
    }

    pub fn display(&self) -> String {
        let mut output = format!(
            "{}\n  {}: {}",
            self.title.white().bold(),
            "Chart".dimmed(),
            self.chart_path.cyan()
        );

        if self.repositories.is_empty() {
            output.push_str(&format!("\n  {}", "No repositories found.".yellow()));
            return output;
        }

        let width = self
            .repositories
            .iter()
            .map(|r| r.name.chars().count())
            .max()
            .unwrap_or(0);

        for repo in &self.repositories {
            output.push_str(&format!(
                "\n  {:>3}. {:<width$}  {:>8}  {}",
                repo.rank,
                repo.name,
                format_count(repo.stars).yellow(),
                repo.url.dimmed(),
                width = width
            ));
        }
        output
    }
}

pub fn output_summary(summary: &ChartSummary<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(summary) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            println!("{}", summary.display());
        }
    }
}

/// 1234567 -> "1,234,567"
fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use star_search::{extract_series, SearchError};

    fn series() -> ChartSeries {
        extract_series(&json!({"items": [
            {"name": "foo", "html_url": "https://x/foo", "owner": {"login": "bob"}, "stargazers_count": 42, "description": null},
            {"name": "longer-name", "html_url": "https://x/longer", "owner": {"login": "amy"}, "stargazers_count": 1234567, "description": "d"}
        ]}))
        .unwrap()
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_summary_ranks_in_series_order() {
        let series = series();
        let summary = ChartSummary::new("Java", "Most-Starred Java Projects on GitHub", Path::new("/tmp/c.html"), &series);

        assert_eq!(summary.repositories.len(), 2);
        assert_eq!(summary.repositories[0].rank, 1);
        assert_eq!(summary.repositories[0].name, "foo");
        assert_eq!(summary.repositories[0].hover, "bob<br />No description provided.");
        assert_eq!(summary.repositories[1].rank, 2);

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["chart_path"], "/tmp/c.html");
        assert_eq!(value["repositories"][1]["stars"], 1234567);
    }

    #[test]
    fn test_summary_text_lists_every_repository() {
        colored::control::set_override(false);
        let series = series();
        let summary = ChartSummary::new("Java", "Most-Starred Java Projects on GitHub", Path::new("/tmp/c.html"), &series);

        let text = summary.display();
        assert!(text.contains("  1. foo"));
        assert!(text.contains("1,234,567"));
        assert!(text.contains("https://x/longer"));
    }

    #[test]
    fn test_error_code_from_root_cause() {
        let err = anyhow::Error::new(SearchError::Request {
            status: 403,
            message: "rate limited".to_string(),
        })
        .context("Failed to fetch Java repositories");
        assert_eq!(error_code(&err), "request_error");

        let err = anyhow::Error::new(SearchError::MalformedResponse("missing `items` field".to_string()));
        assert_eq!(error_code(&err), "malformed_response");

        assert_eq!(error_code(&anyhow::anyhow!("other")), "error");
    }
}
