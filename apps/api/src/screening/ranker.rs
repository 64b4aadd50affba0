//! Similarity Ranker — orders the resumes that passed the skill gate.
//!
//! The skill sentence is embedded once per run; each resume is embedded in
//! full with the same model. Scores are cosine similarities, sorted
//! descending. The sort is stable, so equal scores keep upload order.

use tracing::debug;

use crate::models::resume::{MatchResult, Resume};
use crate::screening::embedder::{EmbedError, Embedder};
use crate::screening::similarity::cosine_similarity;
use crate::screening::skills::SkillSet;

/// Ranks `resumes` (already filtered, in upload order) against `skills`.
///
/// An empty `resumes` slice returns immediately without touching the model.
/// Any embedding failure fails the whole ranking.
pub fn rank(
    resumes: &[Resume],
    skills: &SkillSet,
    embedder: &dyn Embedder,
) -> Result<Vec<MatchResult>, EmbedError> {
    if resumes.is_empty() {
        return Ok(Vec::new());
    }

    let sentence = skills.sentence();
    let skill_embedding = embedder
        .embed(&[sentence.as_str()])?
        .into_iter()
        .next()
        .ok_or(EmbedError::CountMismatch {
            expected: 1,
            got: 0,
        })?;

    let texts: Vec<&str> = resumes.iter().map(|r| r.text.as_str()).collect();
    let resume_embeddings = embedder.embed(&texts)?;
    if resume_embeddings.len() != resumes.len() {
        return Err(EmbedError::CountMismatch {
            expected: resumes.len(),
            got: resume_embeddings.len(),
        });
    }

    let mut results: Vec<MatchResult> = resumes
        .iter()
        .zip(resume_embeddings.iter())
        .map(|(resume, embedding)| MatchResult {
            name: resume.name.clone(),
            similarity: cosine_similarity(&skill_embedding, embedding),
        })
        .collect();

    sort_by_score(&mut results);

    debug!(
        model = embedder.model_name(),
        ranked = results.len(),
        "Ranked resumes"
    );
    Ok(results)
}

/// Descending by similarity. Stable: ties keep their current order.
pub fn sort_by_score(results: &mut [MatchResult]) {
    results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
}
