//! Movie catalog and content-similarity index
//!
//! Answers "top-N most similar movies to X" from a precomputed dense
//! movie-by-movie similarity matrix.

use crate::error::{RecommendError, Result};
use crate::types::{Movie, ScoredMovie};
use ndarray::Array2;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Immutable movie catalog with title and TMDB-id lookup.
pub struct MovieCatalog {
    movies: Vec<Movie>,
    by_title: HashMap<String, usize>,
    by_tmdb: HashMap<i64, usize>,
}

impl MovieCatalog {
    /// Build the catalog, rejecting duplicate titles or TMDB ids.
    pub fn new(movies: Vec<Movie>) -> Result<Self> {
        let mut by_title = HashMap::with_capacity(movies.len());
        let mut by_tmdb = HashMap::with_capacity(movies.len());

        for (pos, movie) in movies.iter().enumerate() {
            if by_title.insert(movie.title.clone(), pos).is_some() {
                return Err(RecommendError::Model(format!(
                    "duplicate title in catalog: {}",
                    movie.title
                )));
            }
            if by_tmdb.insert(movie.tmdb_id, pos).is_some() {
                return Err(RecommendError::Model(format!(
                    "duplicate TMDB id in catalog: {}",
                    movie.tmdb_id
                )));
            }
        }

        Ok(Self {
            movies,
            by_title,
            by_tmdb,
        })
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<&Movie> {
        self.movies.get(pos)
    }

    pub fn position_of_title(&self, title: &str) -> Option<usize> {
        self.by_title.get(title).copied()
    }

    pub fn by_tmdb_id(&self, tmdb_id: i64) -> Option<&Movie> {
        self.by_tmdb.get(&tmdb_id).map(|&pos| &self.movies[pos])
    }

    pub fn contains_tmdb_id(&self, tmdb_id: i64) -> bool {
        self.by_tmdb.contains_key(&tmdb_id)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }
}

/// Content-based similarity index over the catalog.
///
/// The matrix is square with side equal to the catalog size; row i holds the
/// similarity of movie i to every catalog movie. The diagonal is the
/// self-similarity maximum and is never returned as a recommendation.
pub struct SimilarityIndex {
    catalog: MovieCatalog,
    similarity: Array2<f32>,
}

impl SimilarityIndex {
    pub fn new(catalog: MovieCatalog, similarity: Array2<f32>) -> Result<Self> {
        let n = catalog.len();
        if similarity.shape() != [n, n] {
            return Err(RecommendError::Model(format!(
                "similarity matrix shape {:?} does not match catalog size {}",
                similarity.shape(),
                n
            )));
        }
        Ok(Self {
            catalog,
            similarity,
        })
    }

    pub fn catalog(&self) -> &MovieCatalog {
        &self.catalog
    }

    /// Top-k movies most similar to `title`, excluding the movie itself.
    ///
    /// Results are ordered by descending similarity with matrix-order
    /// tie-break (stable sort). Asking for more candidates than the catalog
    /// holds returns all of them; k = 0 returns an empty list.
    pub fn similar_to(&self, title: &str, k: usize) -> Result<Vec<ScoredMovie>> {
        let row = self
            .position_of(title)
            .ok_or_else(|| RecommendError::MovieNotFound(title.to_string()))?;

        Ok(self
            .ranked_row(row)
            .into_iter()
            .take(k)
            .map(|(pos, score)| {
                let movie = &self.catalog.movies[pos];
                ScoredMovie {
                    title: movie.title.clone(),
                    tmdb_id: Some(movie.tmdb_id),
                    score,
                }
            })
            .collect())
    }

    pub(crate) fn position_of(&self, title: &str) -> Option<usize> {
        self.catalog.position_of_title(title)
    }

    /// Full descending ranking of a matrix row, self excluded.
    pub(crate) fn ranked_row(&self, row: usize) -> Vec<(usize, f32)> {
        let mut scored: Vec<(usize, f32)> = self
            .similarity
            .row(row)
            .iter()
            .enumerate()
            .filter(|&(pos, _)| pos != row)
            .map(|(pos, &score)| (pos, score))
            .collect();

        // Stable sort keeps matrix order among equal scores.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored
    }
}
