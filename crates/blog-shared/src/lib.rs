//! # Blog Shared
//!
//! Wire types shared by the service and its clients: request/response payloads
//! and the result envelope every post operation returns.

pub mod dto;
pub mod response;

pub use dto::{CreatePostRequest, HealthResponse, PostView, UpdatePostRequest};
pub use response::ApiResponse;
