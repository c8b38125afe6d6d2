//! End-to-end tests for the recommender facade
//!
//! Builds a small in-memory model bundle and exercises the three
//! recommendation paths through the same API the HTTP layer uses.

use cinematch_core::{
    DenseMatrix, ModelBundle, Movie, MovieLink, RecommendError, Recommender,
};

const NAN: f32 = f32::NAN;

/// Five catalog movies, six rating-side movies, four users.
///
/// MovieLens id 5 has no TMDB mapping; id 6 maps to a TMDB id that is not in
/// the content catalog. User 4 only rated those two, so the hybrid path can
/// never find an anchor for them.
fn fixture() -> Recommender {
    let movies = vec![
        Movie { tmdb_id: 100, title: "Alpha".into() },
        Movie { tmdb_id: 200, title: "Beta".into() },
        Movie { tmdb_id: 300, title: "Gamma".into() },
        Movie { tmdb_id: 400, title: "Delta".into() },
        Movie { tmdb_id: 500, title: "Epsilon".into() },
    ];

    #[rustfmt::skip]
    let similarity = vec![
        1.0, 0.9, 0.8, 0.7, 0.6,
        0.9, 1.0, 0.5, 0.4, 0.3,
        0.8, 0.5, 1.0, 0.6, 0.2,
        0.7, 0.4, 0.6, 1.0, 0.1,
        0.6, 0.3, 0.2, 0.1, 1.0,
    ];

    #[rustfmt::skip]
    let ratings = vec![
        5.0, NAN, NAN, NAN, 4.0, NAN, // user 1
        5.0, 4.0, 3.0, NAN, NAN, NAN, // user 2
        NAN, 2.0, NAN, 5.0, NAN, 4.0, // user 3
        NAN, NAN, NAN, NAN, 2.0, 3.0, // user 4
    ];
    let user_means = vec![4.5, 4.0, 11.0 / 3.0, 2.5];
    let mut normalized = ratings.clone();
    for (i, value) in normalized.iter_mut().enumerate() {
        if !value.is_nan() {
            *value -= user_means[i / 6];
        }
    }

    #[rustfmt::skip]
    let user_similarity = vec![
        1.0, 0.8, 0.4, 0.1,
        0.8, 1.0, 0.5, 0.2,
        0.4, 0.5, 1.0, 0.3,
        0.1, 0.2, 0.3, 1.0,
    ];

    let links = vec![
        MovieLink { movie_id: 1, tmdb_id: Some(100), title: "Alpha".into() },
        MovieLink { movie_id: 2, tmdb_id: Some(200), title: "Beta".into() },
        MovieLink { movie_id: 3, tmdb_id: Some(300), title: "Gamma".into() },
        MovieLink { movie_id: 4, tmdb_id: Some(400), title: "Delta".into() },
        MovieLink { movie_id: 5, tmdb_id: None, title: "Zeta".into() },
        MovieLink { movie_id: 6, tmdb_id: Some(600), title: "Offcat".into() },
    ];

    ModelBundle {
        movies,
        similarity: DenseMatrix { rows: 5, cols: 5, data: similarity },
        user_ids: vec![1, 2, 3, 4],
        movie_ids: vec![1, 2, 3, 4, 5, 6],
        ratings: DenseMatrix { rows: 4, cols: 6, data: ratings },
        ratings_normalized: DenseMatrix { rows: 4, cols: 6, data: normalized },
        user_means,
        user_similarity: DenseMatrix { rows: 4, cols: 4, data: user_similarity },
        links,
    }
    .into_recommender()
    .unwrap()
}

/// Two mutually dissimilar users; no positive neighbors exist.
fn isolated_fixture() -> Recommender {
    ModelBundle {
        movies: vec![
            Movie { tmdb_id: 100, title: "Alpha".into() },
            Movie { tmdb_id: 200, title: "Beta".into() },
        ],
        similarity: DenseMatrix { rows: 2, cols: 2, data: vec![1.0, 0.5, 0.5, 1.0] },
        user_ids: vec![1, 2],
        movie_ids: vec![1, 2],
        ratings: DenseMatrix { rows: 2, cols: 2, data: vec![5.0, NAN, NAN, 4.0] },
        ratings_normalized: DenseMatrix { rows: 2, cols: 2, data: vec![0.0, NAN, NAN, 0.0] },
        user_means: vec![5.0, 4.0],
        user_similarity: DenseMatrix { rows: 2, cols: 2, data: vec![1.0, -0.3, -0.3, 1.0] },
        links: vec![
            MovieLink { movie_id: 1, tmdb_id: Some(100), title: "Alpha".into() },
            MovieLink { movie_id: 2, tmdb_id: Some(200), title: "Beta".into() },
        ],
    }
    .into_recommender()
    .unwrap()
}

#[test]
fn content_recommendations_never_include_the_query_movie() {
    let recommender = fixture();
    for movie in ["Alpha", "Beta", "Gamma", "Delta", "Epsilon"] {
        let recs = recommender.recommend_by_title(movie, 10).unwrap();
        assert!(recs.len() <= 4);
        assert!(recs.iter().all(|r| r.title != movie));
        for pair in recs.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}

#[test]
fn unknown_title_fails_rather_than_returning_empty() {
    let recommender = fixture();
    assert!(matches!(
        recommender.recommend_by_title("Nope", 10),
        Err(RecommendError::MovieNotFound(_))
    ));
}

#[test]
fn collaborative_skips_movies_the_user_already_rated() {
    let recommender = fixture();
    let recs = recommender.recommend_by_user(1, 10).unwrap();
    // User 1 rated Alpha (ml 1) and Zeta (ml 5).
    assert!(recs.iter().all(|r| r.title != "Alpha" && r.title != "Zeta"));
    assert!(!recs.is_empty());
}

#[test]
fn collaborative_ranks_by_predicted_rating() {
    let recommender = fixture();
    let recs = recommender.recommend_by_user(1, 2).unwrap();
    assert_eq!(recs.len(), 2);
    // Delta gets the strongest boost from neighbor 3's 5.0 rating.
    assert_eq!(recs[0].title, "Delta");
    assert!(recs[0].score > recs[1].score);
}

#[test]
fn collaborative_reports_insufficient_neighbors() {
    let recommender = isolated_fixture();
    assert!(matches!(
        recommender.recommend_by_user(1, 10),
        Err(RecommendError::InsufficientNeighbors)
    ));
}

#[test]
fn hybrid_anchors_on_top_rated_catalog_movie() {
    let recommender = fixture();
    let outcome = recommender.recommend_hybrid(1, 10).unwrap();
    assert_eq!(outcome.anchor.title, "Alpha");
}

#[test]
fn hybrid_output_is_subset_of_content_candidates() {
    let recommender = fixture();
    let outcome = recommender.recommend_hybrid(1, 10).unwrap();

    let pool: Vec<String> = recommender
        .recommend_by_title(&outcome.anchor.title, 100)
        .unwrap()
        .into_iter()
        .map(|r| r.title)
        .collect();

    assert!(!outcome.picks.is_empty());
    for pick in &outcome.picks {
        assert!(pool.contains(&pick.title), "{} not in candidate pool", pick.title);
    }
    // Offcat is predicted for user 1 but unreachable from the content side.
    assert!(outcome.picks.iter().all(|p| p.title != "Offcat"));
}

#[test]
fn hybrid_reranks_by_predicted_score() {
    let recommender = fixture();
    let outcome = recommender.recommend_hybrid(1, 10).unwrap();
    let titles: Vec<&str> = outcome.picks.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Delta", "Beta", "Gamma"]);
    for pair in outcome.picks.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn hybrid_fails_without_a_mappable_anchor() {
    let recommender = fixture();
    // User 4 only rated movies that never reach the catalog.
    assert!(matches!(
        recommender.recommend_hybrid(4, 10),
        Err(RecommendError::NoAnchorFound(4))
    ));
}

#[test]
fn hybrid_reports_insufficient_neighbors() {
    let recommender = isolated_fixture();
    assert!(matches!(
        recommender.recommend_hybrid(1, 10),
        Err(RecommendError::InsufficientNeighbors)
    ));
}

#[test]
fn unknown_user_fails_on_both_user_paths() {
    let recommender = fixture();
    assert!(matches!(
        recommender.recommend_by_user(42, 10),
        Err(RecommendError::UserNotFound(42))
    ));
    assert!(matches!(
        recommender.recommend_hybrid(42, 10),
        Err(RecommendError::UserNotFound(42))
    ));
}

#[test]
fn identical_calls_give_identical_output() {
    let recommender = fixture();

    let a = recommender.recommend_by_title("Alpha", 4).unwrap();
    let b = recommender.recommend_by_title("Alpha", 4).unwrap();
    assert_eq!(a, b);

    let a = recommender.recommend_by_user(1, 10).unwrap();
    let b = recommender.recommend_by_user(1, 10).unwrap();
    assert_eq!(a, b);

    let a = recommender.recommend_hybrid(1, 10).unwrap();
    let b = recommender.recommend_hybrid(1, 10).unwrap();
    assert_eq!(a.anchor, b.anchor);
    assert_eq!(a.picks, b.picks);
}

#[test]
fn k_bounds_are_clamped_not_errors() {
    let recommender = fixture();

    assert!(recommender.recommend_by_title("Alpha", 0).unwrap().is_empty());
    assert!(recommender.recommend_by_user(1, 0).unwrap().is_empty());
    assert!(recommender.recommend_hybrid(1, 0).unwrap().picks.is_empty());

    let all = recommender.recommend_by_title("Alpha", 1000).unwrap();
    assert_eq!(all.len(), 4);
    let hybrid = recommender.recommend_hybrid(1, 1000).unwrap();
    assert_eq!(hybrid.picks.len(), 3);
}
