use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity. A unique index hit is reported as
    /// [`RepoError::UniqueViolation`].
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Write the given state over an existing entity and return what was stored.
    /// [`RepoError::NotFound`] if no row matched.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. [`RepoError::NotFound`] if no row was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Fetch a window of posts ordered by creation time, oldest first.
    async fn find_page(&self, offset: u64, limit: u64) -> Result<Vec<Post>, RepoError>;
}
