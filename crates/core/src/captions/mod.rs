pub mod youtube;

use crate::{error::Result, types::Transcript};

/// Source of caption transcripts for a video id.
///
/// Implementations return [`TldwError::NoTranscriptFound`] when the video has
/// no captions in any of the requested languages; every other error is an
/// upstream failure.
///
/// [`TldwError::NoTranscriptFound`]: crate::error::TldwError::NoTranscriptFound
pub trait CaptionsProvider {
    async fn fetch_captions(&self, video_id: &str, languages: &[String]) -> Result<Transcript>;
}
