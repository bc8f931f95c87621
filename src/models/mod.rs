//! Database models and configuration shared across the search layer.

#[cfg(feature = "server")]
pub mod config;
pub mod member;
