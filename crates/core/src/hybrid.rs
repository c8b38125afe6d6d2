//! Hybrid recommendation: content-based retrieval, collaborative re-ranking
//!
//! Seeds from the user's top-rated movie that maps into the content catalog,
//! pulls a pool of content-similar candidates, then re-ranks the pool by
//! collaborative predicted rating. Breadth from content similarity,
//! precision from the neighborhood model.

use crate::catalog::SimilarityIndex;
use crate::crossref::LinkTable;
use crate::error::{RecommendError, Result};
use crate::ratings::RatingStore;
use crate::types::{HybridOutcome, Movie, ScoredMovie};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Size of the content-similar candidate pool fed into re-ranking.
const CANDIDATE_POOL: usize = 100;

/// Two-stage retrieve-then-rerank recommender.
pub struct HybridRanker<'a> {
    index: &'a SimilarityIndex,
    ratings: &'a RatingStore,
    links: &'a LinkTable,
}

impl<'a> HybridRanker<'a> {
    pub fn new(index: &'a SimilarityIndex, ratings: &'a RatingStore, links: &'a LinkTable) -> Self {
        Self {
            index,
            ratings,
            links,
        }
    }

    /// Top-k hybrid picks for a user, along with the anchor movie used.
    pub fn recommend(&self, user_id: i64, k: usize) -> Result<HybridOutcome> {
        if !self.ratings.contains_user(user_id) {
            return Err(RecommendError::UserNotFound(user_id));
        }

        let anchor = self.select_anchor(user_id)?;
        debug!(user_id, anchor = %anchor.title, "hybrid anchor selected");

        // Candidate pool in the rating-id namespace; unmapped movies drop out.
        let candidates: HashSet<i64> = self
            .index
            .similar_to(&anchor.title, CANDIDATE_POOL)?
            .into_iter()
            .filter_map(|rec| rec.tmdb_id)
            .filter_map(|tmdb_id| self.links.movielens_for(tmdb_id))
            .collect();

        let predictions = self.ratings.predict(user_id)?;
        if predictions.is_empty() {
            return Err(RecommendError::InsufficientNeighbors);
        }

        // BTreeMap iteration gives movie-id order, so the stable sort breaks
        // score ties deterministically.
        let mut picks: Vec<(i64, f32)> = predictions
            .into_iter()
            .filter(|(movie_id, _)| candidates.contains(movie_id))
            .collect();
        picks.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        picks.truncate(k);

        let picks = picks
            .into_iter()
            .filter_map(|(movie_id, score)| {
                self.links.get(movie_id).map(|link| ScoredMovie {
                    title: link.title.clone(),
                    tmdb_id: link.tmdb_id,
                    score,
                })
            })
            .collect();

        Ok(HybridOutcome { anchor, picks })
    }

    /// First movie in the user's descending-rated list that has a TMDB
    /// mapping and exists in the content catalog.
    fn select_anchor(&self, user_id: i64) -> Result<Movie> {
        for (movielens_id, _) in self.ratings.ratings_of(user_id)? {
            if let Some(tmdb_id) = self.links.tmdb_for(movielens_id) {
                if let Some(movie) = self.index.catalog().by_tmdb_id(tmdb_id) {
                    return Ok(movie.clone());
                }
            }
        }
        Err(RecommendError::NoAnchorFound(user_id))
    }
}
