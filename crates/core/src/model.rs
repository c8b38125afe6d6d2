//! Model bundle loading
//!
//! The matrices are produced offline by the training pipeline and shipped as
//! a single bincode-encoded bundle. Dense matrices travel as a shape pair
//! plus a flat `Vec<f32>` (NaN marks a missing rating) and are reconstructed
//! into `ndarray` arrays here; the bundle is read once at startup and the
//! resulting [`Recommender`] is immutable for the life of the process.

use crate::catalog::{MovieCatalog, SimilarityIndex};
use crate::crossref::{LinkTable, MovieLink};
use crate::error::{RecommendError, Result};
use crate::ratings::RatingStore;
use crate::recommender::Recommender;
use crate::types::Movie;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Dense matrix in transport form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseMatrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f32>,
}

impl DenseMatrix {
    pub fn from_array(array: &Array2<f32>) -> Self {
        Self {
            rows: array.nrows(),
            cols: array.ncols(),
            data: array.iter().copied().collect(),
        }
    }

    fn into_array(self) -> Result<Array2<f32>> {
        Array2::from_shape_vec((self.rows, self.cols), self.data)
            .map_err(|e| RecommendError::Model(format!("failed to reconstruct matrix: {}", e)))
    }
}

/// All precomputed artifacts the recommender needs, in one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    /// Content catalog, row-aligned with `similarity`.
    pub movies: Vec<Movie>,
    /// Movie-by-movie similarity matrix.
    pub similarity: DenseMatrix,
    /// Row ids of the rating matrices.
    pub user_ids: Vec<i64>,
    /// Column ids (MovieLens namespace) of the rating matrices.
    pub movie_ids: Vec<i64>,
    /// Raw user-item ratings, NaN = no rating.
    pub ratings: DenseMatrix,
    /// Mean-centered ratings, NaN where raw is NaN.
    pub ratings_normalized: DenseMatrix,
    /// Per-user mean rating, aligned with `user_ids`.
    pub user_means: Vec<f32>,
    /// User-by-user similarity matrix.
    pub user_similarity: DenseMatrix,
    /// MovieLens-to-TMDB cross-reference with titles.
    pub links: Vec<MovieLink>,
}

impl ModelBundle {
    /// Read a bundle from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let bundle: ModelBundle = bincode::deserialize_from(BufReader::new(file))?;
        info!(
            path = %path.display(),
            movies = bundle.movies.len(),
            users = bundle.user_ids.len(),
            "model bundle loaded"
        );
        Ok(bundle)
    }

    /// Write a bundle to disk. Used by the offline pipeline and by tests.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        bincode::serialize_into(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Validate shapes and assemble the immutable recommender.
    pub fn into_recommender(self) -> Result<Recommender> {
        let catalog = MovieCatalog::new(self.movies)?;
        let index = SimilarityIndex::new(catalog, self.similarity.into_array()?)?;
        let ratings = RatingStore::new(
            self.user_ids,
            self.movie_ids,
            self.ratings.into_array()?,
            self.ratings_normalized.into_array()?,
            self.user_means,
            self.user_similarity.into_array()?,
        )?;
        let links = LinkTable::new(self.links);
        Ok(Recommender::new(index, ratings, links))
    }
}
