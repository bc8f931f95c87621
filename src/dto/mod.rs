//! JSON payloads returned by the search endpoints.

pub mod member;
