//! Domain entities - the core business objects.

mod collection;
mod post;

pub use collection::PostCollection;
pub use post::{Post, PostId};
