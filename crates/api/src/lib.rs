//! Cinematch HTTP API
//!
//! Presentation adapter over `cinematch-core`: four GET endpoints
//! (`/health`, `/recommend/content`, `/recommend/user`, `/recommend/hybrid`)
//! plus the TMDB poster client and env-based configuration.

pub mod config;
pub mod poster;
pub mod routes;
pub mod server;

pub use config::ServerConfig;
pub use poster::{PosterClient, PLACEHOLDER_POSTER};
pub use server::Server;
