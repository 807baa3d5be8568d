//! Remote Store Client
//!
//! CRUD access to the REST movie collection. Every call is a single request;
//! failures come back as one normalized [`ApiError`].

mod rest;

pub use rest::RestClient;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{Movie, MovieDraft, MovieId};

pub type ApiResult<T> = Result<T, ApiError>;

/// Remote movie collection
///
/// `?Send` because browser fetch futures are tied to the page's event loop.
#[async_trait(?Send)]
pub trait MovieStore {
    /// All movies in server order
    async fn list(&self) -> ApiResult<Vec<Movie>>;

    /// Create a movie; the store assigns its id
    async fn create(&self, draft: &MovieDraft) -> ApiResult<Movie>;

    /// Replace the whole record
    async fn update(&self, id: &MovieId, draft: &MovieDraft) -> ApiResult<Movie>;

    async fn delete(&self, id: &MovieId) -> ApiResult<()>;
}
