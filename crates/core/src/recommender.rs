//! Recommender facade
//!
//! Owns the three model structures and exposes the operations the
//! presentation layers call: content-based, pure collaborative, and hybrid
//! recommendation. Everything is read-only after construction, so a shared
//! reference (e.g. behind `Arc`) serves concurrent requests without locking.

use crate::catalog::SimilarityIndex;
use crate::crossref::LinkTable;
use crate::error::{RecommendError, Result};
use crate::hybrid::HybridRanker;
use crate::ratings::RatingStore;
use crate::types::{HybridOutcome, ScoredMovie};
use std::cmp::Ordering;

pub struct Recommender {
    index: SimilarityIndex,
    ratings: RatingStore,
    links: LinkTable,
}

impl Recommender {
    pub fn new(index: SimilarityIndex, ratings: RatingStore, links: LinkTable) -> Self {
        Self {
            index,
            ratings,
            links,
        }
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    pub fn ratings(&self) -> &RatingStore {
        &self.ratings
    }

    pub fn links(&self) -> &LinkTable {
        &self.links
    }

    /// Top-k movies most similar to the given title.
    pub fn recommend_by_title(&self, title: &str, k: usize) -> Result<Vec<ScoredMovie>> {
        self.index.similar_to(title, k)
    }

    /// Top-k movies by predicted rating for the user, over movies the user
    /// has not rated.
    pub fn recommend_by_user(&self, user_id: i64, k: usize) -> Result<Vec<ScoredMovie>> {
        let predictions = self.ratings.predict(user_id)?;
        if predictions.is_empty() {
            return Err(RecommendError::InsufficientNeighbors);
        }

        let mut ranked: Vec<(i64, f32)> = predictions.into_iter().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked.truncate(k);

        Ok(ranked
            .into_iter()
            .filter_map(|(movie_id, score)| {
                self.links.get(movie_id).map(|link| ScoredMovie {
                    title: link.title.clone(),
                    tmdb_id: link.tmdb_id,
                    score,
                })
            })
            .collect())
    }

    /// Content-retrieved, collaboratively re-ranked top-k for the user.
    pub fn recommend_hybrid(&self, user_id: i64, k: usize) -> Result<HybridOutcome> {
        HybridRanker::new(&self.index, &self.ratings, &self.links).recommend(user_id, k)
    }
}
