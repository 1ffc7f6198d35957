//! tldw core library
//!
//! Fetches YouTube caption transcripts and summarizes them chunk by chunk
//! with a locally hosted language model.

pub mod cache;
pub mod captions;
pub mod chunker;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod llm;
pub mod session;
pub mod summarizer;
pub mod types;
pub mod video;

pub use cache::TranscriptCache;
pub use captions::{CaptionsProvider, youtube::YoutubeCaptions};
pub use chunker::{ChunkerConfig, TextChunker};
pub use error::{Result, TldwError};
pub use fetcher::TranscriptFetcher;
pub use format::{format_timestamp, format_transcript_with_timestamps, transcript_minutes};
pub use llm::{
    ChatMessage, LanguageModel, Role,
    ollama::{OllamaClient, OllamaConfig},
};
pub use session::{ActionOutcome, Frontend, Session};
pub use summarizer::summarize_chunk;
pub use types::{Progress, Segment, Transcript, TranscriptOutcome};
pub use video::extract_video_id;
