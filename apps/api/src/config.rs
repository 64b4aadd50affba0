use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::screening::embedder::ModelChoice;

pub const DEFAULT_SKILLS: &str = "Python, SQL, Machine Learning";

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub embedding_model: ModelChoice,
    pub model_cache_dir: PathBuf,
    pub embedding_warmup: bool,
    pub default_skills: String,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            embedding_model: ModelChoice::default(),
            model_cache_dir: PathBuf::from(".fastembed_cache"),
            embedding_warmup: false,
            default_skills: DEFAULT_SKILLS.to_string(),
            max_upload_bytes: 32 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(v) => v
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => defaults.port,
        };

        let embedding_model = match lookup("EMBEDDING_MODEL") {
            Some(v) => v
                .parse::<ModelChoice>()
                .map_err(|e| anyhow!(e))
                .context("EMBEDDING_MODEL is not a supported model")?,
            None => defaults.embedding_model,
        };

        let embedding_warmup = match lookup("EMBEDDING_WARMUP") {
            Some(v) => parse_bool(&v).context("EMBEDDING_WARMUP must be true or false")?,
            None => defaults.embedding_warmup,
        };

        let max_upload_bytes = match lookup("MAX_UPLOAD_MB") {
            Some(v) => {
                v.parse::<usize>()
                    .context("MAX_UPLOAD_MB must be a whole number of megabytes")?
                    * 1024
                    * 1024
            }
            None => defaults.max_upload_bytes,
        };

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            embedding_model,
            model_cache_dir: lookup("MODEL_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_cache_dir),
            embedding_warmup,
            default_skills: lookup("DEFAULT_SKILLS").unwrap_or(defaults.default_skills),
            max_upload_bytes,
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("'{other}' is not a boolean")),
    }
}
