//! Domain types exposed by the member search layer.

pub mod filter;
pub mod member;
pub mod sort;
pub mod types;
