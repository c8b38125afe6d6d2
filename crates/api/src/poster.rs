//! TMDB poster lookup
//!
//! Thin client around the TMDB movie-detail endpoint. Any failure — missing
//! API key, network error, timeout, non-success status, absent poster path —
//! resolves to the placeholder URL. Nothing here ever propagates an error or
//! retries.

use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const TMDB_MOVIE_URL: &str = "https://api.themoviedb.org/3/movie";
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/500x750?text=No+Image+Found";

#[derive(Debug, Deserialize)]
struct MovieDetail {
    poster_path: Option<String>,
}

#[derive(Clone)]
pub struct PosterClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl PosterClient {
    pub fn new(api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, api_key }
    }

    /// Poster image URL for a TMDB movie id, or the placeholder.
    pub async fn poster_url(&self, tmdb_id: i64) -> String {
        let Some(ref api_key) = self.api_key else {
            return PLACEHOLDER_POSTER.to_string();
        };

        match self.fetch_poster_path(tmdb_id, api_key).await {
            Some(path) => format!("{}{}", IMAGE_BASE_URL, path),
            None => PLACEHOLDER_POSTER.to_string(),
        }
    }

    async fn fetch_poster_path(&self, tmdb_id: i64, api_key: &str) -> Option<String> {
        let url = format!("{}/{}", TMDB_MOVIE_URL, tmdb_id);
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", api_key), ("language", "en-US")])
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            debug!(tmdb_id, status = %response.status(), "TMDB poster lookup failed");
            return None;
        }

        let detail: MovieDetail = response.json().await.ok()?;
        detail.poster_path
    }
}
