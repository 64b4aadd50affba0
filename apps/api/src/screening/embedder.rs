//! Sentence embeddings behind a small trait.
//!
//! `AppState` holds one `Arc<dyn Embedder>` for the lifetime of the process.
//! The default backend is `FastEmbedder` (all-MiniLM-L6-v2 through fastembed's
//! ONNX runtime). `HashEmbedder` is a deterministic, download-free fallback for
//! offline deployments.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use thiserror::Error;
use tracing::info;

/// A dense embedding vector.
pub type Embedding = Vec<f32>;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("failed to load embedding model '{model}': {message}")]
    Load { model: String, message: String },

    #[error("embedding failed: {0}")]
    Encode(String),

    #[error("model returned {got} embeddings for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },
}

/// Turns text into fixed-dimension vectors. The same text must always map to
/// the same vector for a given model.
pub trait Embedder: Send + Sync {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedError>;

    fn model_name(&self) -> &str;
}

// ────────────────────────────────────────────────────────────────────────────
// Model selection
// ────────────────────────────────────────────────────────────────────────────

/// Embedding models accepted by `EMBEDDING_MODEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelChoice {
    #[default]
    AllMiniLmL6V2,
    AllMiniLmL12V2,
    BgeSmallEnV15,
    BgeBaseEnV15,
    /// Feature hashing, no model weights.
    Hash,
}

impl ModelChoice {
    pub fn id(&self) -> &'static str {
        match self {
            ModelChoice::AllMiniLmL6V2 => "all-minilm-l6-v2",
            ModelChoice::AllMiniLmL12V2 => "all-minilm-l12-v2",
            ModelChoice::BgeSmallEnV15 => "bge-small-en-v1.5",
            ModelChoice::BgeBaseEnV15 => "bge-base-en-v1.5",
            ModelChoice::Hash => "hash",
        }
    }

    fn fastembed_model(&self) -> Option<EmbeddingModel> {
        match self {
            ModelChoice::AllMiniLmL6V2 => Some(EmbeddingModel::AllMiniLML6V2),
            ModelChoice::AllMiniLmL12V2 => Some(EmbeddingModel::AllMiniLML12V2),
            ModelChoice::BgeSmallEnV15 => Some(EmbeddingModel::BGESmallENV15),
            ModelChoice::BgeBaseEnV15 => Some(EmbeddingModel::BGEBaseENV15),
            ModelChoice::Hash => None,
        }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ModelChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let choice = match s.trim().to_lowercase().as_str() {
            "all-minilm-l6-v2" | "sentence-transformers/all-minilm-l6-v2" => {
                ModelChoice::AllMiniLmL6V2
            }
            "all-minilm-l12-v2" | "sentence-transformers/all-minilm-l12-v2" => {
                ModelChoice::AllMiniLmL12V2
            }
            "bge-small-en-v1.5" | "baai/bge-small-en-v1.5" => ModelChoice::BgeSmallEnV15,
            "bge-base-en-v1.5" | "baai/bge-base-en-v1.5" => ModelChoice::BgeBaseEnV15,
            "hash" => ModelChoice::Hash,
            other => return Err(format!("unknown embedding model '{other}'")),
        };
        Ok(choice)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FastEmbedder — ONNX sentence-transformer models
// ────────────────────────────────────────────────────────────────────────────

/// fastembed-backed embedder. Weights are loaded on the first `embed` call,
/// or up front through `warm_up`, and kept until the process exits.
pub struct FastEmbedder {
    choice: ModelChoice,
    model_id: &'static str,
    cache_dir: PathBuf,
    model: Mutex<Option<TextEmbedding>>,
}

impl FastEmbedder {
    pub fn new(choice: ModelChoice, cache_dir: PathBuf) -> Self {
        Self {
            choice,
            model_id: choice.id(),
            cache_dir,
            model: Mutex::new(None),
        }
    }

    /// Loads the model now instead of on the first request.
    pub fn warm_up(&self) -> Result<(), EmbedError> {
        let mut guard = self.lock()?;
        if guard.is_none() {
            *guard = Some(self.load()?);
        }
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<TextEmbedding>>, EmbedError> {
        self.model
            .lock()
            .map_err(|_| EmbedError::Encode("embedding model lock poisoned".to_string()))
    }

    fn load(&self) -> Result<TextEmbedding, EmbedError> {
        let model = self.choice.fastembed_model().ok_or_else(|| EmbedError::Load {
            model: self.model_id.to_string(),
            message: "not a fastembed model".to_string(),
        })?;

        info!(
            model = self.model_id,
            cache_dir = %self.cache_dir.display(),
            "Loading embedding model"
        );

        let options = InitOptions::new(model)
            .with_cache_dir(self.cache_dir.clone())
            .with_show_download_progress(false);

        let embedding = TextEmbedding::try_new(options).map_err(|e| EmbedError::Load {
            model: self.model_id.to_string(),
            message: format!("{e:#}"),
        })?;

        info!(model = self.model_id, "Embedding model ready");
        Ok(embedding)
    }
}

impl Embedder for FastEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut guard = self.lock()?;
        if guard.is_none() {
            *guard = Some(self.load()?);
        }
        let model = guard
            .as_mut()
            .ok_or_else(|| EmbedError::Encode("embedding model unavailable".to_string()))?;

        let embeddings = model
            .embed(texts.to_vec(), None)
            .map_err(|e| EmbedError::Encode(format!("{e:#}")))?;

        check_count(texts.len(), embeddings)
    }

    fn model_name(&self) -> &str {
        self.model_id
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HashEmbedder — deterministic fallback
// ────────────────────────────────────────────────────────────────────────────

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
pub const HASH_DIMENSION: usize = 384;

/// Bag-of-words feature hashing (FNV-1a) into an L2-normalised vector.
///
/// All components are non-negative, so cosine scores land in [0, 1]. It only
/// rewards shared words; there is no semantics beyond that.
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn embed_one(&self, text: &str) -> Embedding {
        let mut vector = vec![0.0_f32; self.dimension];
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let bucket = (fnv1a(token.to_lowercase().as_bytes()) % self.dimension as u64) as usize;
            vector[bucket] += 1.0;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        vector
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(HASH_DIMENSION)
    }
}

impl Embedder for HashEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    fn model_name(&self) -> &str {
        ModelChoice::Hash.id()
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, &b| {
        (hash ^ b as u64).wrapping_mul(FNV_PRIME)
    })
}

fn check_count(expected: usize, embeddings: Vec<Embedding>) -> Result<Vec<Embedding>, EmbedError> {
    if embeddings.len() != expected {
        return Err(EmbedError::CountMismatch {
            expected,
            got: embeddings.len(),
        });
    }
    Ok(embeddings)
}
