//! In-memory post gateway - used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::domain::{NewPost, Post, TITLE_MAX_LEN, title_fits};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

struct Table {
    rows: BTreeMap<i32, Post>,
    last_id: i32,
}

/// In-memory post store behind an async RwLock.
///
/// Ids come from a monotonic counter and are never reused after a delete.
/// Data is lost on process restart.
pub struct InMemoryPostRepository {
    table: RwLock<Table>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

// Mirrors the length limit on the `title` column.
fn check_title(title: &str) -> Result<(), RepoError> {
    if title_fits(title) {
        Ok(())
    } else {
        Err(RepoError::Constraint(format!(
            "title exceeds {} characters",
            TITLE_MAX_LEN
        )))
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        check_title(&post.title)?;
        let mut table = self.table.write().await;

        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| RepoError::Constraint("post id sequence exhausted".to_string()))?;
        table.last_id = id;

        let post = post.with_id(id);
        table.rows.insert(id, post.clone());
        Ok(post)
    }

    async fn replace(&self, post: Post) -> Result<Post, RepoError> {
        check_title(&post.title)?;
        let mut table = self.table.write().await;
        table.rows.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        table.rows.remove(&id);
        Ok(())
    }

    async fn list_recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;

        let mut posts: Vec<Post> = table.rows.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        posts.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(posts)
    }
}
