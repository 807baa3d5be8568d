//! REST Client
//!
//! [`MovieStore`] over HTTP. reqwest uses the browser's fetch on wasm32.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::{ApiResult, MovieStore};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{Movie, MovieDraft, MovieId};

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Client for `{base}/{collection}` and `{base}/{collection}/{id}`
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    collection_url: String,
}

impl RestClient {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: &AppConfig) -> Self {
        Self { http, collection_url: config.collection_url() }
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn item_url(&self, id: &MovieId) -> String {
        format!("{}/{}", self.collection_url, utf8_percent_encode(id.as_str(), PATH_SEGMENT))
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> ApiResult<Response> {
        let response = match request.header(ACCEPT, "application/json").send().await {
            Ok(response) => response,
            Err(err) => {
                log::error!("[API] {} failed: {}", operation, err);
                return Err(err.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let err = ApiError::Rejected {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            };
            log::warn!("[API] {} rejected: {}", operation, err);
            return Err(err);
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(operation: &'static str, response: Response) -> ApiResult<T> {
        response.json::<T>().await.map_err(|err| {
            log::error!("[API] {} returned an unreadable body: {}", operation, err);
            ApiError::from(err)
        })
    }
}

#[async_trait(?Send)]
impl MovieStore for RestClient {
    async fn list(&self) -> ApiResult<Vec<Movie>> {
        let response = self.send("list", self.http.get(&self.collection_url)).await?;
        let movies: Vec<Movie> = Self::decode("list", response).await?;
        log::info!("[API] Loaded {} movies", movies.len());
        Ok(movies)
    }

    async fn create(&self, draft: &MovieDraft) -> ApiResult<Movie> {
        let request = self.http.post(&self.collection_url).json(draft);
        let response = self.send("create", request).await?;
        let movie: Movie = Self::decode("create", response).await?;
        log::info!("[API] Created movie {}", movie.id);
        Ok(movie)
    }

    async fn update(&self, id: &MovieId, draft: &MovieDraft) -> ApiResult<Movie> {
        let request = self.http.put(self.item_url(id)).json(draft);
        let response = self.send("update", request).await?;
        let movie: Movie = Self::decode("update", response).await?;
        log::info!("[API] Updated movie {}", id);
        Ok(movie)
    }

    async fn delete(&self, id: &MovieId) -> ApiResult<()> {
        self.send("delete", self.http.delete(self.item_url(id))).await?;
        log::info!("[API] Deleted movie {}", id);
        Ok(())
    }
}
