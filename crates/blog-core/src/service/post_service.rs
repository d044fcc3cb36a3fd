//! Post orchestration: entity/view mapping, existence checks, timestamps,
//! and translation of every outcome into an [`ApiResponse`].

use std::sync::Arc;

use blog_shared::{ApiResponse, CreatePostRequest, PostView, UpdatePostRequest};
use chrono::Utc;

use crate::domain::NewPost;
use crate::error::ServiceError;
use crate::ports::PostRepository;

/// Number of posts returned by `get_recent` when the caller does not say.
pub const DEFAULT_RECENT_COUNT: u64 = 5;

/// Upper bound on `get_recent`.
pub const MAX_RECENT_COUNT: u64 = 100;

const DELETED_MESSAGE: &str = "Post deleted successfully";

/// Service owning the post business rules.
///
/// Public operations never return `Err`: storage failures and missing posts
/// both come back as a failure envelope. Update and delete check existence
/// and then act without a transaction, so a concurrent delete between the
/// two steps is possible and accepted.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self) -> ApiResponse<Vec<PostView>> {
        tracing::debug!("Listing all posts");
        into_envelope(self.try_get_all().await)
    }

    pub async fn get_by_id(&self, id: i32) -> ApiResponse<PostView> {
        tracing::debug!(post_id = id, "Fetching post");
        into_envelope(self.try_get_by_id(id).await)
    }

    /// Up to `count` newest posts. `count` is capped at [`MAX_RECENT_COUNT`];
    /// zero yields an empty list.
    pub async fn get_recent(&self, count: u64) -> ApiResponse<Vec<PostView>> {
        let count = count.min(MAX_RECENT_COUNT);
        tracing::debug!(count, "Listing recent posts");
        into_envelope(self.try_get_recent(count).await)
    }

    pub async fn create(&self, req: CreatePostRequest) -> ApiResponse<PostView> {
        tracing::debug!("Creating post");
        into_envelope(self.try_create(req).await)
    }

    pub async fn update(&self, id: i32, req: UpdatePostRequest) -> ApiResponse<PostView> {
        tracing::debug!(post_id = id, "Updating post");
        into_envelope(self.try_update(id, req).await)
    }

    pub async fn delete(&self, id: i32) -> ApiResponse<bool> {
        tracing::debug!(post_id = id, "Deleting post");
        match self.try_delete(id).await {
            Ok(()) => ApiResponse::ok_with_message(true, DELETED_MESSAGE),
            Err(err) => failure(err),
        }
    }

    async fn try_get_all(&self) -> Result<Vec<PostView>, ServiceError> {
        let posts = self
            .repo
            .list_all()
            .await
            .map_err(ServiceError::storage("retrieving posts"))?;

        Ok(posts.into_iter().map(PostView::from).collect())
    }

    async fn try_get_by_id(&self, id: i32) -> Result<PostView, ServiceError> {
        let post = self
            .repo
            .get(id)
            .await
            .map_err(ServiceError::storage("retrieving post"))?
            .ok_or(ServiceError::NotFound(id))?;

        Ok(post.into())
    }

    async fn try_get_recent(&self, count: u64) -> Result<Vec<PostView>, ServiceError> {
        let posts = self
            .repo
            .list_recent(count)
            .await
            .map_err(ServiceError::storage("retrieving posts"))?;

        Ok(posts.into_iter().map(PostView::from).collect())
    }

    async fn try_create(&self, req: CreatePostRequest) -> Result<PostView, ServiceError> {
        let post = NewPost::from_request(req, Utc::now());
        let created = self
            .repo
            .insert(post)
            .await
            .map_err(ServiceError::storage("creating post"))?;

        tracing::info!(post_id = created.id, "Post created");
        Ok(created.into())
    }

    async fn try_update(&self, id: i32, req: UpdatePostRequest) -> Result<PostView, ServiceError> {
        let mut post = self
            .repo
            .get(id)
            .await
            .map_err(ServiceError::storage("updating post"))?
            .ok_or(ServiceError::NotFound(id))?;

        post.apply_update(req, Utc::now());

        let stored = self
            .repo
            .replace(post)
            .await
            .map_err(ServiceError::storage("updating post"))?;

        tracing::info!(post_id = id, "Post updated");
        Ok(stored.into())
    }

    async fn try_delete(&self, id: i32) -> Result<(), ServiceError> {
        self.repo
            .get(id)
            .await
            .map_err(ServiceError::storage("deleting post"))?
            .ok_or(ServiceError::NotFound(id))?;

        self.repo
            .delete(id)
            .await
            .map_err(ServiceError::storage("deleting post"))?;

        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }
}

fn into_envelope<T>(result: Result<T, ServiceError>) -> ApiResponse<T> {
    match result {
        Ok(data) => ApiResponse::ok(data),
        Err(err) => failure(err),
    }
}

fn failure<T>(err: ServiceError) -> ApiResponse<T> {
    if err.is_not_found() {
        tracing::info!("{}", err);
    } else {
        tracing::error!(error = %err, "Post storage operation failed");
    }
    ApiResponse::failure(err.to_string())
}
