use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a titled piece of content owned by the user who created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Partial update of a post. `None` or an empty string leaves the stored
/// value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Post {
    /// Create a new post owned by `owner`, stamped with `now`.
    pub fn new(owner: Uuid, fields: NewPost, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: fields.title,
            content: fields.content,
            image: fields.image,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge `patch` into a copy of this post.
    ///
    /// `id`, `owner` and `created_at` are carried over unchanged. `updated_at`
    /// never moves backwards, even if the clock does. Empty strings in the
    /// patch count as absent.
    pub fn merged(&self, patch: PostPatch, now: DateTime<Utc>) -> Self {
        Self {
            id: self.id,
            title: non_empty(patch.title).unwrap_or_else(|| self.title.clone()),
            content: non_empty(patch.content).unwrap_or_else(|| self.content.clone()),
            image: non_empty(patch.image).or_else(|| self.image.clone()),
            owner: self.owner,
            created_at: self.created_at,
            updated_at: now.max(self.updated_at),
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner == user_id
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn sample(now: DateTime<Utc>) -> Post {
        Post::new(
            Uuid::new_v4(),
            NewPost {
                title: "Hello".to_string(),
                content: "World".to_string(),
                image: Some("https://img.example/1.png".to_string()),
            },
            now,
        )
    }

    #[test]
    fn test_new_post_timestamps_match() {
        let now = Utc::now();
        let post = sample(now);
        assert_eq!(post.created_at, post.updated_at);
        assert!(!post.id.is_nil());
    }

    #[test]
    fn test_merged_keeps_unpatched_fields() {
        let now = Utc::now();
        let post = sample(now);
        let later = now + TimeDelta::seconds(5);

        let merged = post.merged(
            PostPatch {
                content: Some("Edited".to_string()),
                ..Default::default()
            },
            later,
        );

        assert_eq!(merged.title, "Hello");
        assert_eq!(merged.content, "Edited");
        assert_eq!(merged.image, post.image);
        assert_eq!(merged.owner, post.owner);
        assert_eq!(merged.created_at, now);
        assert_eq!(merged.updated_at, later);
    }

    #[test]
    fn test_merged_ignores_empty_strings() {
        let now = Utc::now();
        let post = sample(now);

        let merged = post.merged(
            PostPatch {
                title: Some(String::new()),
                content: Some(String::new()),
                image: Some(String::new()),
            },
            now,
        );

        assert_eq!(merged.title, "Hello");
        assert_eq!(merged.content, "World");
        assert_eq!(merged.image, post.image);
    }

    #[test]
    fn test_merged_never_moves_updated_at_backwards() {
        let now = Utc::now();
        let post = sample(now);

        let merged = post.merged(PostPatch::default(), now - TimeDelta::minutes(1));

        assert_eq!(merged.updated_at, now);
    }
}
