//! Post resource manager - lifecycle operations over a [`PostRepository`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    DEFAULT_LIMIT, DEFAULT_MAX_LIMIT, NewPost, PageRequest, Post, PostPage, PostPatch, Requester,
};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

/// Who may update or delete a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Any authenticated requester may modify any post.
    #[default]
    Open,
    /// Only the post's owner may modify it.
    OwnerOnly,
}

impl AccessPolicy {
    /// Whether `requester` may modify `post` under this policy.
    pub fn permits(&self, requester: &Requester, post: &Post) -> bool {
        match self {
            AccessPolicy::Open => true,
            AccessPolicy::OwnerOnly => post.is_owned_by(requester.id),
        }
    }
}

impl FromStr for AccessPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(AccessPolicy::Open),
            "owner-only" | "owner_only" | "owner" => Ok(AccessPolicy::OwnerOnly),
            other => Err(format!("unknown access policy '{}'", other)),
        }
    }
}

impl fmt::Display for AccessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessPolicy::Open => write!(f, "open"),
            AccessPolicy::OwnerOnly => write!(f, "owner-only"),
        }
    }
}

/// Manager configuration.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Page size when the caller gives none or an unusable one.
    pub default_limit: u64,
    /// Largest page size a caller may request.
    pub max_limit: u64,
    pub access_policy: AccessPolicy,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
            access_policy: AccessPolicy::Open,
        }
    }
}

/// Parse a post id received from the transport.
///
/// A string that is not a UUID cannot match any record, so it is reported
/// as not found.
pub fn parse_post_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw.trim()).map_err(|_| DomainError::post_not_found(raw))
}

/// Owns the create/read/list/update/delete lifecycle of posts.
///
/// Holds no state besides the shared repository handle, so a single
/// instance can serve concurrent requests.
#[derive(Clone)]
pub struct PostManager {
    repo: Arc<dyn PostRepository>,
    config: ManagerConfig,
}

impl PostManager {
    pub fn new(repo: Arc<dyn PostRepository>, config: ManagerConfig) -> Self {
        Self { repo, config }
    }

    /// Build a bounded page window from raw `page`/`limit` query values.
    pub fn page_request(&self, page: Option<&str>, limit: Option<&str>) -> PageRequest {
        PageRequest::from_query(page, limit, self.config.default_limit, self.config.max_limit)
    }

    /// Create a post owned by `requester`.
    pub async fn create(&self, requester: &Requester, fields: NewPost) -> Result<Post, DomainError> {
        let post = Post::new(requester.id, fields, Utc::now());
        let title = post.title.clone();

        let created = self.repo.insert(post).await.map_err(|e| match e {
            RepoError::UniqueViolation(detail) => {
                tracing::debug!(%title, %detail, "Rejected duplicate post title");
                DomainError::Conflict(format!("Post with title '{}' already exists", title))
            }
            other => other.into(),
        })?;

        tracing::info!(post_id = %created.id, owner = %created.owner, "Post created");
        Ok(created)
    }

    /// Apply `patch` to an existing post and return the stored result.
    ///
    /// `owner` and `created_at` are never changed; `updated_at` is refreshed.
    pub async fn update(
        &self,
        requester: &Requester,
        id: Uuid,
        patch: PostPatch,
    ) -> Result<Post, DomainError> {
        let existing = self.get(id).await?;

        if !self.config.access_policy.permits(requester, &existing) {
            tracing::warn!(post_id = %id, requester = %requester.id, "Update denied");
            return Err(DomainError::Forbidden("post"));
        }

        let merged = existing.merged(patch, Utc::now());

        let updated = self.repo.update(merged).await.map_err(|e| match e {
            // Deleted between the read and the write.
            RepoError::NotFound => DomainError::post_not_found(id),
            RepoError::UniqueViolation(_) => {
                DomainError::Conflict("Post with that title already exists".to_string())
            }
            other => other.into(),
        })?;

        tracing::info!(post_id = %id, "Post updated");
        Ok(updated)
    }

    /// Fetch a single post. No ownership check is applied.
    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    /// Fetch one page of posts, oldest first.
    pub async fn list(&self, request: PageRequest) -> Result<PostPage, DomainError> {
        tracing::debug!(
            page = request.page,
            limit = request.limit,
            offset = request.offset(),
            "Listing posts"
        );

        let posts = self.repo.find_page(request.offset(), request.limit).await?;
        Ok(PostPage::new(posts, request))
    }

    /// Permanently delete a post.
    pub async fn delete(&self, requester: &Requester, id: Uuid) -> Result<(), DomainError> {
        if self.config.access_policy == AccessPolicy::OwnerOnly {
            let existing = self.get(id).await?;
            if !existing.is_owned_by(requester.id) {
                tracing::warn!(post_id = %id, requester = %requester.id, "Delete denied");
                return Err(DomainError::Forbidden("post"));
            }
        }

        self.repo.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(id),
            other => other.into(),
        })?;

        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }
}
