use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A file received from the upload form, before extraction.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub name: String,
    pub data: Bytes,
}

impl ResumeUpload {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// A resume whose text has been extracted. `text` is always lowercase.
#[derive(Debug, Clone, PartialEq)]
pub struct Resume {
    pub name: String,
    pub text: String,
}

/// Raw ranker output: cosine similarity between the skill sentence and a resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub name: String,
    pub similarity: f32,
}
