use crate::error::{ApiError, Result};
use crate::services::SearchSettings;
use dotenv::dotenv;
use std::env;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BOOKS_FILE: &str = "data/books_with_emotions.csv";
const DEFAULT_COVER_URL: &str = "assets/missing_cover.png";
const DEFAULT_INITIAL_TOP_K: usize = 50;
const DEFAULT_FINAL_TOP_K: usize = 12;
const DEFAULT_EMBEDDING_DIMENSION: usize = 384;
const DEFAULT_MAX_QUERY_CHARS: usize = 8192;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub books_file: String,
    pub default_cover_url: String,
    pub initial_top_k: usize,
    pub final_top_k: usize,
    pub embedding_dimension: usize,
    pub max_query_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let config = Config {
            host: env::var("APP_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: parsed_var("APP_PORT", DEFAULT_PORT)?,
            books_file: env::var("APP_BOOKS_FILE")
                .unwrap_or_else(|_| DEFAULT_BOOKS_FILE.to_string()),
            default_cover_url: env::var("APP_DEFAULT_COVER_URL")
                .unwrap_or_else(|_| DEFAULT_COVER_URL.to_string()),
            initial_top_k: parsed_var("APP_INITIAL_TOP_K", DEFAULT_INITIAL_TOP_K)?,
            final_top_k: parsed_var("APP_FINAL_TOP_K", DEFAULT_FINAL_TOP_K)?,
            embedding_dimension: parsed_var(
                "APP_EMBEDDING_DIMENSION",
                DEFAULT_EMBEDDING_DIMENSION,
            )?,
            max_query_chars: parsed_var("APP_MAX_QUERY_CHARS", DEFAULT_MAX_QUERY_CHARS)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.initial_top_k == 0 || self.final_top_k == 0 {
            return Err(ApiError::Configuration(
                "top-k settings must be at least 1".to_string(),
            ));
        }
        if self.final_top_k > self.initial_top_k {
            return Err(ApiError::Configuration(format!(
                "final_top_k ({}) must not exceed initial_top_k ({})",
                self.final_top_k, self.initial_top_k
            )));
        }
        if self.embedding_dimension == 0 {
            return Err(ApiError::Configuration(
                "embedding dimension must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            initial_top_k: self.initial_top_k,
            final_top_k: self.final_top_k,
            default_cover_url: self.default_cover_url.clone(),
        }
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| {
            ApiError::Configuration(format!("{} has invalid value '{}'", name, value))
        }),
        Err(_) => Ok(default),
    }
}
