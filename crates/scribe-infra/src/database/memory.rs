//! In-memory post repository - used when no database is configured, and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::Post;
use scribe_core::error::RepoError;
use scribe_core::ports::{BaseRepository, PostRepository};

/// In-memory post store using a HashMap behind an async RwLock.
///
/// Enforces title uniqueness the way the `posts_title_key` index does, and
/// pages in the same order as the PostgreSQL repository.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }

    fn title_taken(posts: &HashMap<Uuid, Post>, title: &str, except: Option<Uuid>) -> bool {
        posts
            .values()
            .any(|p| p.title == title && Some(p.id) != except)
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        // Check and insert under one write lock so racing inserts see each other.
        let mut posts = self.posts.write().await;

        if posts.contains_key(&post.id) {
            return Err(RepoError::UniqueViolation("posts_pkey".to_string()));
        }
        if Self::title_taken(&posts, &post.title, None) {
            return Err(RepoError::UniqueViolation("posts_title_key".to_string()));
        }

        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;

        if !posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        if Self::title_taken(&posts, &post.title, Some(post.id)) {
            return Err(RepoError::UniqueViolation("posts_title_key".to_string()));
        }

        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_page(&self, offset: u64, limit: u64) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;

        let mut ordered: Vec<&Post> = posts.values().collect();
        ordered.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(ordered
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}
