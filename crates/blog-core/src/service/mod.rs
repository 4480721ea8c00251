//! Application services built on the domain and its ports.

mod post_service;
mod validator;

pub use post_service::PostService;
pub use validator::{FormValidator, PostFields, PostForm};
