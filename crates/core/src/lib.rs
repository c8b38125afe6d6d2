//! Cinematch recommendation core
//!
//! Scores movie recommendations from precomputed model artifacts using three
//! strategies: content similarity, user-based collaborative filtering, and a
//! hybrid that retrieves content-similar candidates and re-ranks them by
//! predicted rating. The matrices are loaded once at startup and never
//! mutated, so a single [`Recommender`] can be shared across request
//! handlers without locking.
//!
//! ## Modules
//!
//! - `catalog`: movie catalog and content-similarity index
//! - `ratings`: rating matrices and k-NN collaborative prediction
//! - `hybrid`: retrieve-then-rerank hybrid recommender
//! - `crossref`: MovieLens/TMDB id cross-reference
//! - `recommender`: facade exposed to presentation layers
//! - `model`: on-disk model bundle loading
//! - `error`: error taxonomy

pub mod catalog;
pub mod crossref;
pub mod error;
pub mod hybrid;
pub mod model;
pub mod ratings;
pub mod recommender;
pub mod types;

pub use catalog::{MovieCatalog, SimilarityIndex};
pub use crossref::{LinkTable, MovieLink};
pub use error::{RecommendError, Result};
pub use hybrid::HybridRanker;
pub use model::{DenseMatrix, ModelBundle};
pub use ratings::RatingStore;
pub use recommender::Recommender;
pub use types::{HybridOutcome, Movie, ScoredMovie};
