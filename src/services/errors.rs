use thiserror::Error;

use crate::domain::member::MemberTeam;
use crate::domain::sort::{SortParseError, UnsupportedSortField};
use crate::pagination::PageRequestError;
use crate::repository::errors::RepositoryError;

/// Failures surfaced by the search operations. Nothing is retried.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Malformed pagination or sort parameters; no query was executed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A sort property did not resolve under the reject policy; no query was executed.
    #[error(transparent)]
    UnsupportedSortField(#[from] UnsupportedSortField),

    /// The content query (or the store itself) failed.
    #[error("Storage failure: {0}")]
    Storage(#[from] RepositoryError),

    /// The content query succeeded but the count query failed.
    #[error("Count query failed after content was fetched: {source}")]
    CountFailed {
        content: Vec<MemberTeam>,
        #[source]
        source: RepositoryError,
    },
}

pub type SearchResult<T> = Result<T, SearchError>;

impl From<PageRequestError> for SearchError {
    fn from(err: PageRequestError) -> Self {
        SearchError::InvalidRequest(err.to_string())
    }
}

impl From<SortParseError> for SearchError {
    fn from(err: SortParseError) -> Self {
        SearchError::InvalidRequest(err.to_string())
    }
}
