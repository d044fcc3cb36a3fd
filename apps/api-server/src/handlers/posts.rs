//! Post handlers.
//!
//! Each handler forwards to `PostService` and only picks the status code;
//! the envelope is written out unchanged.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};

use blog_core::service::DEFAULT_RECENT_COUNT;
use blog_shared::{ApiResponse, CreatePostRequest, UpdatePostRequest};

use crate::state::AppState;

/// Route name used to build `Location` headers.
pub const GET_POST_ROUTE: &str = "get_post";

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub count: Option<u64>,
}

fn respond<T: Serialize>(
    result: &ApiResponse<T>,
    success: StatusCode,
    failure: StatusCode,
) -> HttpResponse {
    let status = if result.is_success() { success } else { failure };
    HttpResponse::build(status).json(result)
}

/// GET /api/v1/posts
pub async fn list_posts(state: web::Data<AppState>) -> HttpResponse {
    tracing::info!("Getting all blog posts");
    let result = state.posts.get_all().await;
    respond(&result, StatusCode::OK, StatusCode::BAD_REQUEST)
}

/// GET /api/v1/posts/recent?count=N
pub async fn recent_posts(
    state: web::Data<AppState>,
    query: web::Query<RecentQuery>,
) -> HttpResponse {
    let count = query.count.unwrap_or(DEFAULT_RECENT_COUNT);
    let result = state.posts.get_recent(count).await;
    respond(&result, StatusCode::OK, StatusCode::BAD_REQUEST)
}

/// GET /api/v1/posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i32>) -> HttpResponse {
    let result = state.posts.get_by_id(path.into_inner()).await;
    respond(&result, StatusCode::OK, StatusCode::NOT_FOUND)
}

/// POST /api/v1/posts
pub async fn create_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> HttpResponse {
    let result = state.posts.create(body.into_inner()).await;

    let Some(post) = result.data() else {
        return HttpResponse::BadRequest().json(&result);
    };

    let mut response = HttpResponse::Created();
    match req.url_for(GET_POST_ROUTE, [post.id.to_string()]) {
        Ok(location) => {
            response.insert_header((header::LOCATION, location.to_string()));
        }
        Err(e) => tracing::warn!(post_id = post.id, "Could not build Location header: {}", e),
    }
    response.json(&result)
}

/// PUT /api/v1/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> HttpResponse {
    let result = state
        .posts
        .update(path.into_inner(), body.into_inner())
        .await;
    respond(&result, StatusCode::OK, StatusCode::NOT_FOUND)
}

/// DELETE /api/v1/posts/{id}
pub async fn delete_post(state: web::Data<AppState>, path: web::Path<i32>) -> HttpResponse {
    let result = state.posts.delete(path.into_inner()).await;
    respond(&result, StatusCode::OK, StatusCode::NOT_FOUND)
}
