//! Skill Filter — the cheap keyword gate that runs before any embedding.
//!
//! Matching is a plain case-insensitive substring test. "ML" does not match
//! "machine learning"; that is the accepted cost of a gate this cheap.

use serde::Serialize;

/// Ordered, trimmed list of required skills.
///
/// Tokens that are empty after trimming are dropped, so `"Python, , SQL"`
/// holds two skills and `"  "` holds none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillSet {
    skills: Vec<String>,
}

impl SkillSet {
    /// Parses a comma-separated skill list as typed by the user.
    pub fn parse(input: &str) -> Self {
        Self::from_skills(input.split(','))
    }

    pub fn from_skills<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let skills = skills
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self { skills }
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    /// The skills joined by single spaces, in input order. This is the text
    /// embedded once per run.
    pub fn sentence(&self) -> String {
        self.skills.join(" ")
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.skills.clone()
    }
}

/// True iff every skill occurs in `resume_text` as a contiguous substring.
///
/// `resume_text` is expected to be lowercase already (the extractor guarantees
/// it). An empty skill set places no constraint.
pub fn has_required_skills(resume_text: &str, skills: &SkillSet) -> bool {
    skills
        .iter()
        .all(|skill| resume_text.contains(&skill.trim().to_lowercase()))
}
