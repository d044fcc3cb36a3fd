use blog_shared::{CreatePostRequest, PostView, UpdatePostRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest title, in characters, that storage accepts.
pub const TITLE_MAX_LEN: u32 = 200;

/// Whether `title` fits the storage column.
pub fn title_fits(title: &str) -> bool {
    title.chars().count() <= TITLE_MAX_LEN as usize
}

/// Post entity - a blog post as stored, with its storage-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

/// A post that has not been persisted yet and so has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    /// Build an unsaved post from a create request, stamped with `created_at`.
    pub fn from_request(req: CreatePostRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            title: req.title,
            content: req.content,
            created_at,
        }
    }

    /// Attach the id assigned by storage.
    pub fn with_id(self, id: i32) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            created_at: self.created_at,
            modified_at: None,
        }
    }
}

impl Post {
    /// Replace the mutable fields and stamp the modification time.
    ///
    /// `created_at` is never touched, and `modified_at` is clamped so it
    /// cannot precede it even if the clock stepped backwards.
    pub fn apply_update(&mut self, req: UpdatePostRequest, now: DateTime<Utc>) {
        self.title = req.title;
        self.content = req.content;
        self.modified_at = Some(now.max(self.created_at));
    }
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
            modified_at: post.modified_at,
        }
    }
}
