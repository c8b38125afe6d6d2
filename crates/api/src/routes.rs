//! HTTP handlers for the recommendation endpoints
//!
//! Stateless wrappers over the core [`Recommender`]: parse the query, call
//! the scoring function, attach poster URLs, serialize. Domain failures map
//! to 404/400 responses; anything else is a 500.

use crate::poster::{PosterClient, PLACEHOLDER_POSTER};
use actix_web::{web, HttpResponse, Responder};
use cinematch_core::{RecommendError, Recommender, ScoredMovie};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub posters: PosterClient,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .service(
            web::scope("/recommend")
                .route("/content", web::get().to(recommend_content))
                .route("/user", web::get().to(recommend_user))
                .route("/hybrid", web::get().to(recommend_hybrid)),
        );
}

fn default_num_recs() -> usize {
    10
}

#[derive(Debug, Deserialize)]
struct ContentQuery {
    movie_title: String,
    #[serde(default = "default_num_recs")]
    num_recs: usize,
}

#[derive(Debug, Deserialize)]
struct UserQuery {
    user_id: i64,
    #[serde(default = "default_num_recs")]
    num_recs: usize,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "cinematch-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn recommend_content(
    state: web::Data<AppState>,
    query: web::Query<ContentQuery>,
) -> impl Responder {
    match state
        .recommender
        .recommend_by_title(&query.movie_title, query.num_recs)
    {
        Ok(recs) => {
            let results = with_posters(&state.posters, recs).await;
            HttpResponse::Ok().json(json!({
                "anchor_movie": query.movie_title,
                "recommendations": results
            }))
        }
        Err(e) => error_response(e),
    }
}

async fn recommend_user(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    match state
        .recommender
        .recommend_by_user(query.user_id, query.num_recs)
    {
        Ok(recs) => {
            let results = with_posters(&state.posters, recs).await;
            HttpResponse::Ok().json(json!({
                "user_id": query.user_id,
                "recommendations": results
            }))
        }
        Err(e) => error_response(e),
    }
}

async fn recommend_hybrid(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    match state
        .recommender
        .recommend_hybrid(query.user_id, query.num_recs)
    {
        Ok(outcome) => {
            let results = with_posters(&state.posters, outcome.picks).await;
            HttpResponse::Ok().json(json!({
                "anchor_movie": outcome.anchor.title,
                "recommendations": results
            }))
        }
        Err(e) => error_response(e),
    }
}

async fn with_posters(posters: &PosterClient, recs: Vec<ScoredMovie>) -> Vec<serde_json::Value> {
    let mut results = Vec::with_capacity(recs.len());
    for rec in recs {
        let poster_url = match rec.tmdb_id {
            Some(tmdb_id) => posters.poster_url(tmdb_id).await,
            None => PLACEHOLDER_POSTER.to_string(),
        };
        results.push(json!({
            "title": rec.title,
            "tmdb_id": rec.tmdb_id,
            "score": rec.score,
            "poster_url": poster_url
        }));
    }
    results
}

fn error_response(err: RecommendError) -> HttpResponse {
    match err {
        RecommendError::MovieNotFound(_) | RecommendError::UserNotFound(_) => {
            HttpResponse::NotFound().json(json!({
                "error": "not_found",
                "message": err.to_string()
            }))
        }
        RecommendError::NoAnchorFound(_) => HttpResponse::BadRequest().json(json!({
            "error": "no_anchor_found",
            "message": err.to_string()
        })),
        RecommendError::InsufficientNeighbors => HttpResponse::BadRequest().json(json!({
            "error": "insufficient_neighbors",
            "message": err.to_string()
        })),
        other => {
            tracing::error!("recommendation failed: {}", other);
            HttpResponse::InternalServerError().json(json!({
                "error": "internal_error",
                "message": "Internal server error"
            }))
        }
    }
}
