use crate::{
    cache::TranscriptCache,
    captions::CaptionsProvider,
    error::TldwError,
    types::TranscriptOutcome,
    video::extract_video_id,
};

/// Fetches transcripts through a captions provider, memoized per URL
#[derive(Debug)]
pub struct TranscriptFetcher<C> {
    provider: C,
    languages: Vec<String>,
    cache: TranscriptCache,
}

impl<C: CaptionsProvider> TranscriptFetcher<C> {
    pub fn new(provider: C) -> Self {
        Self {
            provider,
            languages: vec!["en".to_string()],
            cache: TranscriptCache::new(),
        }
    }

    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        if !languages.is_empty() {
            self.languages = languages;
        }
        self
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn cache(&self) -> &TranscriptCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch(&mut self, url: &str) -> TranscriptOutcome {
        if let Some(cached) = self.cache.get(url) {
            tracing::debug!("Transcript cache hit");
            return cached.clone();
        }

        let video_id = extract_video_id(url.trim());
        let outcome = match self.provider.fetch_captions(video_id, &self.languages).await {
            Ok(transcript) if transcript.is_blank() => TranscriptOutcome::NotFound,
            Ok(transcript) => {
                tracing::info!(
                    video_id,
                    segments = transcript.segments.len(),
                    language = %transcript.language,
                    "Fetched transcript"
                );
                TranscriptOutcome::Found(transcript)
            }
            Err(TldwError::NoTranscriptFound { .. }) => {
                tracing::info!(video_id, "No transcript available");
                TranscriptOutcome::NotFound
            }
            Err(e) => {
                tracing::error!(video_id, error = %e, "Failed to fetch transcript");
                TranscriptOutcome::Failed(e.to_string())
            }
        };

        self.cache.insert(url, &outcome);
        outcome
    }
}
