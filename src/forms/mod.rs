//! Query-string forms accepted by the search endpoints.

pub mod member;
