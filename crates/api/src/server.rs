//! HTTP server assembly
//!
//! Loads the model bundle once, wraps it in shared state, and serves the
//! recommendation routes. The recommender is immutable after load, so one
//! `Arc` is shared across all workers with no locking.

use crate::config::ServerConfig;
use crate::poster::PosterClient;
use crate::routes::{self, AppState};
use actix_web::{web, App, HttpServer};
use cinematch_core::ModelBundle;
use std::sync::Arc;
use tracing::info;

pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        info!("Starting Cinematch API");
        info!("Version: {}", env!("CARGO_PKG_VERSION"));

        let recommender = Arc::new(
            ModelBundle::load(&self.config.model_path)?.into_recommender()?,
        );
        info!(
            movies = recommender.index().catalog().len(),
            users = recommender.ratings().user_ids().len(),
            links = recommender.links().len(),
            "recommender ready"
        );

        if self.config.tmdb_api_key.is_none() {
            info!("No TMDB API key configured; poster lookups will use the placeholder");
        }
        let posters = PosterClient::new(self.config.tmdb_api_key.clone());

        let bind_addr = format!("{}:{}", self.config.host, self.config.port);
        info!("Binding to {}", bind_addr);

        HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(AppState {
                    recommender: recommender.clone(),
                    posters: posters.clone(),
                }))
                .configure(routes::configure)
        })
        .bind(bind_addr)?
        .run()
        .await?;

        Ok(())
    }
}
