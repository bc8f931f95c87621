//! Search operations exposed to the HTTP layer and other collaborators.

pub mod errors;
pub mod member;

pub use errors::{SearchError, SearchResult};
