use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the shortlist table and of the CSV export.
/// `match_score` is cosine similarity × 100, rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistRow {
    #[serde(rename = "Resume")]
    pub resume: String,
    #[serde(rename = "Match_Score")]
    pub match_score: f64,
}

/// An upload that was dropped from the run without aborting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedResume {
    pub name: String,
    pub reason: String,
}

/// Everything a single screening run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub run_id: Uuid,
    pub skills: Vec<String>,
    pub shortlisted: Vec<ShortlistRow>,
    pub skipped: Vec<SkippedResume>,
    /// Resumes that parsed but did not mention every required skill.
    pub filtered_out: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub completed_at: DateTime<Utc>,
}
