//! Post handlers.

use actix_web::{HttpRequest, HttpResponse, web};

use scribe_core::domain::{NewPost, Post, PostPatch};
use scribe_core::parse_post_id;
use scribe_shared::ApiResponse;
use scribe_shared::dto::{CreatePostRequest, ListPostsQuery, PostResponse, UpdatePostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        image: post.image,
        owner: post.owner,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = state
        .posts
        .create(
            &identity.requester(),
            NewPost {
                title: req.title,
                content: req.content,
                image: req.image,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(to_response(post))))
}

/// PATCH /api/posts/{post_id} (PUT is accepted too)
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path)?;
    let req = body.into_inner();

    let post = state
        .posts
        .update(
            &identity.requester(),
            id,
            PostPatch {
                title: req.title,
                content: req.content,
                image: req.image,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// GET /api/posts/{post_id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path)?;
    let post = state.posts.get(id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// GET /api/posts?page=&limit=
///
/// The query string is parsed leniently: anything unusable falls back to
/// the first page at the default size.
pub async fn list_posts(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    let query = web::Query::<ListPostsQuery>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .unwrap_or_default();

    let request = state
        .posts
        .page_request(query.page.as_deref(), query.limit.as_deref());
    let page = state.posts.list(request).await?;

    let data: Vec<PostResponse> = page.posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::list(data, page.page, page.limit)))
}

/// DELETE /api/posts/{post_id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path)?;
    state.posts.delete(&identity.requester(), id).await?;

    Ok(HttpResponse::NoContent().finish())
}
