//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::domain::sort::UnknownSortFieldPolicy;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    #[serde(default)]
    pub search: SearchSettings,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
/// Limits and policies applied to every search request.
pub struct SearchSettings {
    /// Page size used when the caller does not ask for one.
    pub default_page_size: i64,
    /// Larger requested page sizes are clamped to this value.
    pub max_page_size: i64,
    pub unknown_sort_fields: UnknownSortFieldPolicy,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 2000,
            unknown_sort_fields: UnknownSortFieldPolicy::Skip,
        }
    }
}
