//! User-based collaborative filtering over precomputed rating matrices
//!
//! Holds the raw and mean-centered user-item matrices (NaN = no rating), the
//! per-user mean ratings and the user-user similarity matrix, and predicts
//! ratings for unseen movies by neighbor-weighted averaging.

use crate::error::{RecommendError, Result};
use ndarray::Array2;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Neighborhood size for k-NN prediction.
const NEIGHBOR_POOL: usize = 15;

/// Immutable store of the rating-side model artifacts.
///
/// Movie ids here live in the rating dataset's namespace (MovieLens), not the
/// content catalog's; the [`LinkTable`](crate::crossref::LinkTable) bridges
/// the two.
pub struct RatingStore {
    user_ids: Vec<i64>,
    user_pos: HashMap<i64, usize>,
    movie_ids: Vec<i64>,
    /// Raw ratings, NaN where the user has not rated the movie.
    raw: Array2<f32>,
    /// Mean-centered ratings, NaN where raw is NaN.
    centered: Array2<f32>,
    /// Per-user mean of given ratings.
    means: Vec<f32>,
    /// Square user-user similarity; diagonal is self-similarity.
    user_similarity: Array2<f32>,
}

impl RatingStore {
    pub fn new(
        user_ids: Vec<i64>,
        movie_ids: Vec<i64>,
        raw: Array2<f32>,
        centered: Array2<f32>,
        means: Vec<f32>,
        user_similarity: Array2<f32>,
    ) -> Result<Self> {
        let (n_users, n_movies) = (user_ids.len(), movie_ids.len());

        if raw.shape() != [n_users, n_movies] {
            return Err(RecommendError::Model(format!(
                "rating matrix shape {:?} does not match {} users x {} movies",
                raw.shape(),
                n_users,
                n_movies
            )));
        }
        if centered.shape() != raw.shape() {
            return Err(RecommendError::Model(
                "normalized rating matrix shape differs from raw".to_string(),
            ));
        }
        if means.len() != n_users {
            return Err(RecommendError::Model(format!(
                "user means length {} does not match {} users",
                means.len(),
                n_users
            )));
        }
        if user_similarity.shape() != [n_users, n_users] {
            return Err(RecommendError::Model(format!(
                "user similarity shape {:?} is not square over {} users",
                user_similarity.shape(),
                n_users
            )));
        }

        let mut user_pos = HashMap::with_capacity(n_users);
        for (pos, &id) in user_ids.iter().enumerate() {
            if user_pos.insert(id, pos).is_some() {
                return Err(RecommendError::Model(format!("duplicate user id: {}", id)));
            }
        }

        Ok(Self {
            user_ids,
            user_pos,
            movie_ids,
            raw,
            centered,
            means,
            user_similarity,
        })
    }

    pub fn contains_user(&self, user_id: i64) -> bool {
        self.user_pos.contains_key(&user_id)
    }

    pub fn user_ids(&self) -> &[i64] {
        &self.user_ids
    }

    fn position_of(&self, user_id: i64) -> Result<usize> {
        self.user_pos
            .get(&user_id)
            .copied()
            .ok_or(RecommendError::UserNotFound(user_id))
    }

    /// The user's own ratings, sorted descending by value (matrix-order
    /// tie-break). Used for hybrid anchor selection.
    pub fn ratings_of(&self, user_id: i64) -> Result<Vec<(i64, f32)>> {
        let pos = self.position_of(user_id)?;
        let mut rated: Vec<(i64, f32)> = self
            .raw
            .row(pos)
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.is_nan())
            .map(|(col, &r)| (self.movie_ids[col], r))
            .collect();
        rated.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        Ok(rated)
    }

    /// Top similar users to the target, self excluded, strictly positive
    /// similarity only. May be empty.
    fn neighbors(&self, pos: usize) -> Vec<(usize, f32)> {
        let mut similar: Vec<(usize, f32)> = self
            .user_similarity
            .row(pos)
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != pos)
            .map(|(other, &sim)| (other, sim))
            .collect();

        similar.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        similar.truncate(NEIGHBOR_POOL);
        similar.retain(|&(_, sim)| sim > 0.0);
        similar
    }

    /// Predicted ratings for every movie the user has not rated.
    ///
    /// Each prediction is the user's mean plus the similarity-weighted
    /// average of the neighbors' mean-centered ratings; the denominator sums
    /// only the weights of neighbors who actually rated the movie. Movies no
    /// positive-similarity neighbor rated are dropped. An empty map means
    /// there was not enough neighbor data, which the caller reports as
    /// [`InsufficientNeighbors`](RecommendError::InsufficientNeighbors).
    pub fn predict(&self, user_id: i64) -> Result<BTreeMap<i64, f32>> {
        let pos = self.position_of(user_id)?;
        let neighbors = self.neighbors(pos);
        if neighbors.is_empty() {
            return Ok(BTreeMap::new());
        }

        let target_mean = self.means[pos];
        let target_row = self.raw.row(pos);
        let mut predictions = BTreeMap::new();

        for (col, &movie_id) in self.movie_ids.iter().enumerate() {
            if !target_row[col].is_nan() {
                continue; // already rated
            }

            let mut weighted_sum = 0.0f32;
            let mut weight_total = 0.0f32;
            for &(neighbor, weight) in &neighbors {
                let rating = self.raw[[neighbor, col]];
                if rating.is_nan() {
                    continue;
                }
                weighted_sum += weight * self.centered[[neighbor, col]];
                weight_total += weight;
            }

            if weight_total > 0.0 {
                predictions.insert(movie_id, target_mean + weighted_sum / weight_total);
            }
        }

        Ok(predictions)
    }
}
