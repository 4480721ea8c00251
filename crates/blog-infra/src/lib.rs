//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! - [`JsonFilePostStore`] - the whole collection as one JSON document on disk
//! - [`InMemoryPostStore`] - process-local fallback; data is lost on restart

pub mod store;

pub use store::{InMemoryPostStore, JsonFilePostStore};
