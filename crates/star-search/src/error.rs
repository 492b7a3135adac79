use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    /// Non-success HTTP status from the search endpoint
    #[error("Request failed ({status}): {message}")]
    Request { status: u16, message: String },

    /// Network failure that survived the retry
    #[error("Request failed: {0}")]
    Transport(#[from] ureq::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl SearchError {
    /// HTTP status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            SearchError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for both request kinds (HTTP status or transport)
    pub fn is_request_error(&self) -> bool {
        matches!(self, SearchError::Request { .. } | SearchError::Transport(_))
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::MalformedResponse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
