//! Screening pipeline: Extractor → Filter → Ranker → report rows.
//!
//! Runs synchronously; async callers wrap it in `spawn_blocking`. A file that
//! cannot be parsed is recorded in `skipped` and the run continues. An
//! embedding failure aborts the run.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::models::report::{ScreeningReport, SkippedResume};
use crate::models::resume::{Resume, ResumeUpload};
use crate::screening::embedder::{EmbedError, Embedder};
use crate::screening::extract::extract_text;
use crate::screening::ranker::rank;
use crate::screening::report::to_rows;
use crate::screening::skills::{has_required_skills, SkillSet};

pub const NO_MATCH_WARNING: &str = "No resumes matched all required skills.";
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Runs one full screening pass over a batch of uploads.
pub fn screen(
    uploads: Vec<ResumeUpload>,
    skills: &SkillSet,
    embedder: &dyn Embedder,
) -> Result<ScreeningReport, EmbedError> {
    let run_id = Uuid::new_v4();
    let span = info_span!("screen", %run_id);
    let _enter = span.enter();

    let uploaded = uploads.len();
    let (resumes, skipped) = extract_all(uploads);

    let (qualifying, rejected): (Vec<Resume>, Vec<Resume>) = resumes
        .into_iter()
        .partition(|r| has_required_skills(&r.text, skills));

    let results = rank(&qualifying, skills, embedder)?;
    let shortlisted = to_rows(&results);

    let warning = shortlisted.is_empty().then(|| NO_MATCH_WARNING.to_string());

    info!(
        uploaded,
        skipped = skipped.len(),
        filtered_out = rejected.len(),
        shortlisted = shortlisted.len(),
        "Screening complete"
    );

    Ok(ScreeningReport {
        run_id,
        skills: skills.to_vec(),
        shortlisted,
        skipped,
        filtered_out: rejected.len(),
        warning,
        completed_at: Utc::now(),
    })
}

/// Extracts every upload, keeping upload order for the ones that succeed.
fn extract_all(uploads: Vec<ResumeUpload>) -> (Vec<Resume>, Vec<SkippedResume>) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut resumes = Vec::with_capacity(uploads.len());
    let mut skipped = Vec::new();

    for upload in uploads {
        if !seen.insert(upload.name.clone()) {
            warn!(file = %upload.name, "Skipping duplicate file name");
            skipped.push(SkippedResume {
                name: upload.name,
                reason: "duplicate file name".to_string(),
            });
            continue;
        }

        if !looks_like_pdf(&upload) {
            warn!(file = %upload.name, "Skipping non-PDF upload");
            skipped.push(SkippedResume {
                name: upload.name,
                reason: "not a PDF file".to_string(),
            });
            continue;
        }

        match extract_text(&upload.data) {
            Ok(text) => resumes.push(Resume {
                name: upload.name,
                text,
            }),
            Err(e) => {
                warn!(file = %upload.name, "Skipping unreadable resume: {e}");
                skipped.push(SkippedResume {
                    name: upload.name,
                    reason: e.to_string(),
                });
            }
        }
    }

    (resumes, skipped)
}

/// `.pdf` extension or the `%PDF-` magic. A `.pdf` file with bad contents
/// still goes to the extractor so the parse error is reported.
fn looks_like_pdf(upload: &ResumeUpload) -> bool {
    upload.name.to_lowercase().ends_with(".pdf") || upload.data.starts_with(PDF_MAGIC)
}
