use async_trait::async_trait;

use crate::domain::{NewPost, Post};
use crate::error::RepoError;

/// Persistence gateway for posts.
///
/// Implementations delegate durability and isolation to the storage engine;
/// concurrent writes to the same id are last-write-wins.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All stored posts, in no particular order.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Find a post by its id.
    async fn get(&self, id: i32) -> Result<Option<Post>, RepoError>;

    /// Persist a new post and return it with its assigned id.
    ///
    /// Titles longer than [`TITLE_MAX_LEN`](crate::domain::TITLE_MAX_LEN)
    /// characters fail with `RepoError::Constraint`, as does `replace`.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Overwrite every column of an existing post and return the row as stored.
    ///
    /// Callers must check the id exists first.
    async fn replace(&self, post: Post) -> Result<Post, RepoError>;

    /// Remove a post. Absent ids are a no-op.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;

    /// Up to `limit` posts, newest `created_at` first.
    async fn list_recent(&self, limit: u64) -> Result<Vec<Post>, RepoError>;
}
