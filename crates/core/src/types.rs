use serde::{Deserialize, Serialize};

/// A catalog entry: TMDB id plus title, both unique within the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub tmdb_id: i64,
    pub title: String,
}

/// A recommended movie with its score.
///
/// `score` is a raw similarity for content-based results and a predicted
/// rating for collaborative and hybrid results. `tmdb_id` is `None` when the
/// movie has no cross-reference into the content catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMovie {
    pub title: String,
    pub tmdb_id: Option<i64>,
    pub score: f32,
}

/// Result of the hybrid path: the anchor that seeded candidate generation
/// plus the collaboratively re-ranked picks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridOutcome {
    pub anchor: Movie,
    pub picks: Vec<ScoredMovie>,
}
