//! Domain entities - the core business objects.

mod pagination;
mod post;
mod requester;

pub use pagination::{DEFAULT_LIMIT, DEFAULT_MAX_LIMIT, PageRequest, PostPage};
pub use post::{NewPost, Post, PostPatch};
pub use requester::Requester;
