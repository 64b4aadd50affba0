// Resume screening: extract → skill gate → semantic rank → table / CSV.
// CPU-bound work (PDF parsing, embedding) must run inside tokio::task::spawn_blocking.

pub mod embedder;
pub mod extract;
pub mod handlers;
pub mod page;
pub mod pipeline;
pub mod ranker;
pub mod report;
pub mod similarity;
pub mod skills;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_support;

pub use embedder::{Embedder, FastEmbedder, HashEmbedder, ModelChoice};
