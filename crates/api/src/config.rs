//! Service configuration from environment variables
//!
//! All variables use the `CINEMATCH_` prefix. `.env` files are honored via
//! dotenvy before loading.
//!
//! - `CINEMATCH_HOST` (optional, default `0.0.0.0`)
//! - `CINEMATCH_PORT` (optional, default `8080`)
//! - `CINEMATCH_MODEL_PATH` (required): path to the model bundle file
//! - `CINEMATCH_TMDB_API_KEY` (optional): poster lookups fall back to a
//!   placeholder image when absent

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub tmdb_api_key: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("CINEMATCH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match env::var("CINEMATCH_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid CINEMATCH_PORT: {}", raw))?,
            Err(_) => 8080,
        };

        let model_path = env::var("CINEMATCH_MODEL_PATH")
            .context("CINEMATCH_MODEL_PATH is required")?
            .into();

        let tmdb_api_key = env::var("CINEMATCH_TMDB_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        Ok(Self {
            host,
            port,
            model_path,
            tmdb_api_key,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            bail!("CINEMATCH_HOST must not be empty");
        }
        if self.port == 0 {
            bail!("CINEMATCH_PORT must be non-zero");
        }
        if !self.model_path.is_file() {
            bail!(
                "CINEMATCH_MODEL_PATH does not point to a file: {}",
                self.model_path.display()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_zero_fails_validation() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 0,
            model_path: PathBuf::from("/tmp/model.bin"),
            tmdb_api_key: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_model_file_fails_validation() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            model_path: PathBuf::from("/definitely/not/here.bin"),
            tmdb_api_key: None,
        };
        assert!(config.validate().is_err());
    }
}
