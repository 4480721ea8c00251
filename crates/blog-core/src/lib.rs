//! # Blog Core
//!
//! The domain layer of the Masterblog backend.
//! Posts, the storage port, form validation and the post service live here;
//! nothing in this crate touches the filesystem or the network.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, StoreError, ValidationError};
pub use service::{FormValidator, PostForm, PostService};
