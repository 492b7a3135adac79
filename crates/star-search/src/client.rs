use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};
use ureq::Agent;

use crate::error::{Result, SearchError};
use crate::extract::parse_search_result;
use crate::models::SearchResult;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
/// Largest page size the search endpoint accepts
pub const MAX_PER_PAGE: u32 = 100;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("starplot/", env!("CARGO_PKG_VERSION"));
/// Extra attempts after a transport failure
const TRANSPORT_RETRIES: u32 = 1;

/// Blocking client for the GitHub repository search endpoint
pub struct SearchClient {
    agent: Agent,
    base_url: String,
    timeout: Duration,
}

impl SearchClient {
    /// Create a new client targeting api.github.com
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a new client with a custom base URL (for GitHub Enterprise or testing)
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            agent: build_agent(DEFAULT_TIMEOUT),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replace the global request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = build_agent(timeout);
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the search URL for the most-starred repositories of a language
    pub fn search_url(&self, language: &str, per_page: u32) -> String {
        let query = format!("language:{}", language);
        format!(
            "{}/search/repositories?q={}&sort=stars&per_page={}",
            self.base_url,
            urlencoding::encode(&query),
            per_page
        )
    }

    /// Fetch one page of the most-starred repositories and return the decoded JSON body
    pub fn fetch_top_repositories(&self, language: &str, per_page: u32) -> Result<Value> {
        let language = language.trim();
        if language.is_empty() {
            return Err(SearchError::InvalidQuery("language must not be empty".to_string()));
        }
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(SearchError::InvalidQuery(format!(
                "per_page must be between 1 and {}, got {}",
                MAX_PER_PAGE, per_page
            )));
        }

        let url = self.search_url(language, per_page);
        info!(%language, per_page, "searching repositories");

        let response = self.get(&url)?;
        let mut response = self.check_response(response)?;
        let body = response.body_mut().read_to_string()?;
        let value: Value = serde_json::from_str(&body)?;
        Ok(value)
    }

    /// Fetch and parse in one call
    pub fn search_top_repositories(&self, language: &str, per_page: u32) -> Result<SearchResult> {
        let body = self.fetch_top_repositories(language, per_page)?;
        parse_search_result(&body)
    }

    /// Issue the GET, retrying once on a transport failure
    fn get(&self, url: &str) -> Result<ureq::http::Response<ureq::Body>> {
        let mut attempt = 0;
        loop {
            debug!(%url, attempt, "GET");
            let result = self
                .agent
                .get(url)
                .header("Accept", ACCEPT)
                .header("User-Agent", USER_AGENT)
                .call();

            match result {
                Ok(response) => return Ok(response),
                Err(err) if attempt < TRANSPORT_RETRIES && is_transient(&err) => {
                    warn!(error = %err, "transient network failure, retrying");
                    attempt += 1;
                }
                Err(err) => return Err(SearchError::Transport(err)),
            }
        }
    }

    /// Check response status and return error if not successful
    fn check_response(
        &self,
        mut response: ureq::http::Response<ureq::Body>,
    ) -> Result<ureq::http::Response<ureq::Body>> {
        let status = response.status().as_u16();

        if (200..300).contains(&status) {
            return Ok(response);
        }

        let body = response
            .body_mut()
            .read_to_string()
            .unwrap_or_else(|_| String::new());

        // GitHub error bodies carry a `message` field
        let message = if let Ok(error_response) = serde_json::from_str::<Value>(&body) {
            error_response
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or(&body)
                .to_string()
        } else if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            body
        };

        warn!(status, %message, "search request rejected");
        Err(SearchError::Request { status, message })
    }
}

impl Default for SearchClient {
    fn default() -> Self {
        Self::new()
    }
}

fn build_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

fn is_transient(err: &ureq::Error) -> bool {
    matches!(
        err,
        ureq::Error::Io(_) | ureq::Error::Timeout(_) | ureq::Error::ConnectionFailed
    )
}
