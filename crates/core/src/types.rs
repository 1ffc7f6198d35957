use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub video_id: String,
    pub language: String,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub duration: f64,
    pub text: String,
}

impl Transcript {
    /// Segment texts in order, joined with a single space
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|seg| seg.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_blank(&self) -> bool {
        self.segments.iter().all(|seg| seg.text.trim().is_empty())
    }
}

/// Result of looking up the transcript for a video reference.
///
/// `NotFound` is the soft outcome (the video has no usable captions) and is
/// kept apart from `Failed`, which carries the upstream error detail.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptOutcome {
    Found(Transcript),
    NotFound,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed as f64 / self.total as f64
    }
}
