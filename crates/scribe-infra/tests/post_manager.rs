//! Post lifecycle tests against the in-memory store.

use std::sync::Arc;

use uuid::Uuid;

use scribe_core::domain::{NewPost, PageRequest, PostPatch, Requester};
use scribe_core::ports::BaseRepository;
use scribe_core::{AccessPolicy, DomainError, ManagerConfig, PostManager};
use scribe_infra::InMemoryPostRepository;

fn setup(policy: AccessPolicy) -> (PostManager, Arc<InMemoryPostRepository>) {
    let repo = Arc::new(InMemoryPostRepository::new());
    let manager = PostManager::new(
        repo.clone(),
        ManagerConfig {
            access_policy: policy,
            ..ManagerConfig::default()
        },
    );
    (manager, repo)
}

fn fields(title: &str) -> NewPost {
    NewPost {
        title: title.to_string(),
        content: format!("content of {}", title),
        image: Some(format!("https://img.example/{}.png", title)),
    }
}

fn requester() -> Requester {
    Requester::new(Uuid::new_v4())
}

#[tokio::test]
async fn test_create_stamps_owner_and_timestamps() {
    let (manager, _) = setup(AccessPolicy::Open);
    let alice = requester();

    let post = manager.create(&alice, fields("hello")).await.unwrap();

    assert!(!post.id.is_nil());
    assert_eq!(post.owner, alice.id);
    assert_eq!(post.created_at, post.updated_at);
    assert_eq!(post.title, "hello");
    assert_eq!(post.image.as_deref(), Some("https://img.example/hello.png"));
}

#[tokio::test]
async fn test_duplicate_title_conflicts() {
    let (manager, repo) = setup(AccessPolicy::Open);

    manager.create(&requester(), fields("t1")).await.unwrap();
    let err = manager.create(&requester(), fields("t1")).await.unwrap_err();

    assert!(matches!(err, DomainError::Conflict(_)));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_get_returns_stored_fields() {
    let (manager, repo) = setup(AccessPolicy::Open);
    let created = manager.create(&requester(), fields("stored")).await.unwrap();

    let fetched = manager.get(created.id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(repo.find_by_id(created.id).await.unwrap(), Some(created));
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let (manager, _) = setup(AccessPolicy::Open);

    let err = manager.get(Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_update_missing_is_not_found_and_leaves_store_alone() {
    let (manager, repo) = setup(AccessPolicy::Open);
    let existing = manager.create(&requester(), fields("keep")).await.unwrap();

    let err = manager
        .update(
            &requester(),
            Uuid::new_v4(),
            PostPatch {
                title: Some("changed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
    assert_eq!(repo.len().await, 1);
    assert_eq!(manager.get(existing.id).await.unwrap(), existing);
}

#[tokio::test]
async fn test_update_merges_and_returns_fresh_state() {
    let (manager, _) = setup(AccessPolicy::Open);
    let alice = requester();
    let bob = requester();
    let original = manager.create(&alice, fields("draft")).await.unwrap();

    let updated = manager
        .update(
            &bob,
            original.id,
            PostPatch {
                content: Some("final".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.content, "final");
    assert_eq!(updated.title, "draft");
    assert_eq!(updated.image, original.image);
    assert_eq!(updated.owner, alice.id);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at >= original.updated_at);
    assert_eq!(manager.get(original.id).await.unwrap(), updated);
}

#[tokio::test]
async fn test_update_to_taken_title_conflicts() {
    let (manager, _) = setup(AccessPolicy::Open);
    let author = requester();
    manager.create(&author, fields("first")).await.unwrap();
    let second = manager.create(&author, fields("second")).await.unwrap();

    let err = manager
        .update(
            &author,
            second.id,
            PostPatch {
                title: Some("first".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Conflict(_)));
}

#[tokio::test]
async fn test_list_pages_through_posts() {
    let (manager, _) = setup(AccessPolicy::Open);
    let author = requester();
    for i in 0..15 {
        manager
            .create(&author, fields(&format!("post-{:02}", i)))
            .await
            .unwrap();
    }

    let first = manager.list(PageRequest::new(1, 10)).await.unwrap();
    let second = manager.list(PageRequest::new(2, 10)).await.unwrap();
    let third = manager.list(PageRequest::new(3, 10)).await.unwrap();

    assert_eq!(first.results, 10);
    assert_eq!(second.results, 5);
    assert_eq!(third.results, 0);

    let mut seen: Vec<Uuid> = first.posts.iter().chain(&second.posts).map(|p| p.id).collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 15);
}

#[tokio::test]
async fn test_list_with_garbage_query_uses_defaults() {
    let (manager, _) = setup(AccessPolicy::Open);
    let author = requester();
    for i in 0..12 {
        manager
            .create(&author, fields(&format!("p{}", i)))
            .await
            .unwrap();
    }

    let garbage = manager.page_request(Some("abc"), Some("xyz"));
    let defaults = manager.page_request(None, None);
    assert_eq!(garbage, defaults);

    let from_garbage = manager.list(garbage).await.unwrap();
    let explicit = manager.list(PageRequest::new(1, 10)).await.unwrap();

    let ids = |page: &scribe_core::domain::PostPage| -> Vec<Uuid> {
        page.posts.iter().map(|p| p.id).collect()
    };
    assert_eq!(ids(&from_garbage), ids(&explicit));
    assert_eq!(from_garbage.results, 10);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let (manager, _) = setup(AccessPolicy::Open);
    let post = manager.create(&requester(), fields("gone")).await.unwrap();

    manager.delete(&requester(), post.id).await.unwrap();

    assert!(matches!(
        manager.get(post.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let (manager, _) = setup(AccessPolicy::Open);

    let err = manager.delete(&requester(), Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_duplicate_then_delete_scenario() {
    let (manager, _) = setup(AccessPolicy::Open);

    let a = manager.create(&requester(), fields("t1")).await.unwrap();
    let b = manager.create(&requester(), fields("t1")).await;
    assert!(matches!(b, Err(DomainError::Conflict(_))));

    assert_eq!(manager.get(a.id).await.unwrap().id, a.id);

    manager.delete(&requester(), a.id).await.unwrap();
    assert!(matches!(
        manager.get(a.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_owner_only_policy_guards_mutations() {
    let (manager, repo) = setup(AccessPolicy::OwnerOnly);
    let owner = requester();
    let stranger = requester();
    let post = manager.create(&owner, fields("guarded")).await.unwrap();

    let update = manager
        .update(
            &stranger,
            post.id,
            PostPatch {
                title: Some("hijacked".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(update, Err(DomainError::Forbidden(_))));

    let delete = manager.delete(&stranger, post.id).await;
    assert!(matches!(delete, Err(DomainError::Forbidden(_))));
    assert_eq!(repo.len().await, 1);

    manager.delete(&owner, post.id).await.unwrap();
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_concurrent_creates_with_same_title_admit_one() {
    let (manager, repo) = setup(AccessPolicy::Open);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let manager = manager.clone();
            tokio::spawn(async move { manager.create(&requester(), fields("race")).await })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(DomainError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
    assert_eq!(repo.len().await, 1);
}
