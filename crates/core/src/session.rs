//! The two user actions ("Get Transcript" and "Summarize") wired over the
//! fetcher, chunker and summarizer, rendering through a [`Frontend`].

use crate::{
    captions::CaptionsProvider,
    chunker::{ChunkerConfig, TextChunker},
    error::Result,
    fetcher::TranscriptFetcher,
    llm::LanguageModel,
    summarizer::summarize_chunk,
    types::{Progress, Transcript, TranscriptOutcome},
};

pub const MISSING_URL: &str = "Please enter a valid YouTube URL.";
pub const TRANSCRIPT_NOT_FOUND: &str =
    "Transcript not found. The video may not have captions or the URL might be invalid.";
pub const SUMMARY_SOURCE_MISSING: &str = "Failed to extract transcript for summarization.";

/// Output surfaces an action renders to
pub trait Frontend {
    /// A blocking step started
    fn busy(&mut self, message: &str);
    /// The current blocking step finished
    fn idle(&mut self);
    fn transcript(&mut self, transcript: &Transcript);
    fn summary(&mut self, summary: &str);
    fn error(&mut self, message: &str);
    fn progress(&mut self, progress: Progress);
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    MissingUrl,
    Transcript(Transcript),
    Summary {
        transcript: Transcript,
        summary: String,
        failed_chunks: usize,
    },
    NotFound,
    Failed(String),
}

pub struct Session<C, M> {
    fetcher: TranscriptFetcher<C>,
    model: M,
    chunker: TextChunker,
}

impl<C, M> Session<C, M>
where
    C: CaptionsProvider,
    M: LanguageModel,
{
    pub fn new(captions: C, model: M) -> Self {
        Self {
            fetcher: TranscriptFetcher::new(captions),
            model,
            chunker: TextChunker::default(),
        }
    }

    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.fetcher = self.fetcher.with_languages(languages);
        self
    }

    pub fn with_chunking(mut self, config: ChunkerConfig) -> Result<Self> {
        self.chunker = TextChunker::new(config)?;
        Ok(self)
    }

    pub fn fetcher(&self) -> &TranscriptFetcher<C> {
        &self.fetcher
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// "Get Transcript"
    #[tracing::instrument(skip(self, ui))]
    pub async fn fetch_action<F: Frontend>(&mut self, url: &str, ui: &mut F) -> ActionOutcome {
        if url.trim().is_empty() {
            ui.error(MISSING_URL);
            return ActionOutcome::MissingUrl;
        }

        match self.load_transcript(url, ui).await {
            TranscriptOutcome::Found(transcript) => {
                ui.transcript(&transcript);
                ActionOutcome::Transcript(transcript)
            }
            TranscriptOutcome::NotFound => {
                ui.error(TRANSCRIPT_NOT_FOUND);
                ActionOutcome::NotFound
            }
            TranscriptOutcome::Failed(detail) => {
                ui.error(&format!("Error fetching transcript: {detail}"));
                ActionOutcome::Failed(detail)
            }
        }
    }

    /// "Summarize"
    #[tracing::instrument(skip(self, ui))]
    pub async fn summarize_action<F: Frontend>(&mut self, url: &str, ui: &mut F) -> ActionOutcome {
        if url.trim().is_empty() {
            ui.error(MISSING_URL);
            return ActionOutcome::MissingUrl;
        }

        let transcript = match self.load_transcript(url, ui).await {
            TranscriptOutcome::Found(transcript) => transcript,
            TranscriptOutcome::NotFound => {
                ui.error(SUMMARY_SOURCE_MISSING);
                return ActionOutcome::NotFound;
            }
            TranscriptOutcome::Failed(detail) => {
                ui.error(&format!(
                    "{}: {detail}",
                    SUMMARY_SOURCE_MISSING.trim_end_matches('.')
                ));
                return ActionOutcome::Failed(detail);
            }
        };

        ui.transcript(&transcript);

        ui.busy("Summarizing transcript...");
        let (summary, failed_chunks) = self.summarize_transcript(&transcript, ui).await;
        ui.idle();

        ui.summary(&summary);
        ActionOutcome::Summary {
            transcript,
            summary,
            failed_chunks,
        }
    }

    /// Drop everything this session remembered
    pub fn end(&mut self) {
        self.fetcher.clear_cache();
    }

    async fn load_transcript<F: Frontend>(&mut self, url: &str, ui: &mut F) -> TranscriptOutcome {
        ui.busy("Fetching transcript...");
        let outcome = self.fetcher.fetch(url).await;
        ui.idle();
        outcome
    }

    /// Summarize chunk by chunk, in order. A failing chunk is reported and
    /// left out; progress still advances past it.
    async fn summarize_transcript<F: Frontend>(
        &self,
        transcript: &Transcript,
        ui: &mut F,
    ) -> (String, usize) {
        let chunks = self.chunker.split(&transcript.text());
        let total = chunks.len();
        tracing::info!(chunks = total, "Summarizing transcript");

        let mut summaries = Vec::with_capacity(total);
        let mut failed = 0;

        ui.progress(Progress { completed: 0, total });
        for (i, chunk) in chunks.iter().enumerate() {
            match summarize_chunk(&self.model, chunk).await {
                Ok(summary) if !summary.is_empty() => summaries.push(summary),
                Ok(_) => tracing::warn!(chunk = i, "Model returned an empty summary"),
                Err(e) => {
                    failed += 1;
                    ui.error(&format!("Error during summarization: {e}"));
                }
            }
            ui.progress(Progress {
                completed: i + 1,
                total,
            });
        }

        (summaries.join(" "), failed)
    }
}
