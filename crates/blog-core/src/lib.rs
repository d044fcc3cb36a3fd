//! # Blog Core
//!
//! The domain layer of the blog service: the `Post` entity, the persistence
//! port, and the service that turns storage outcomes into result envelopes.
//! This crate has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{RepoError, ServiceError};
pub use service::PostService;
