//! Point-of-interest keyword search.
//!
//! Thin collaborator around a blog-search API: the engine never sees this,
//! the menu calls it directly for the "find places" feature.

pub mod blog;

pub use blog::{BlogPost, BlogSearchClient, SearchError};
