pub mod client;
pub mod error;
pub mod extract;
pub mod models;


pub use client::{SearchClient, DEFAULT_BASE_URL, MAX_PER_PAGE};
pub use error::{Result, SearchError};
pub use extract::{extract_series, parse_search_result, NO_DESCRIPTION};
pub use models::*;
