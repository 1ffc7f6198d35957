use std::sync::{Arc, Mutex};
use tldw_core::{CaptionsProvider, Result, Segment, TldwError, Transcript};

#[derive(Clone)]
pub enum MockReply {
    Transcript(Transcript),
    NotFound,
    Fail(String),
}

#[derive(Clone)]
pub struct MockCaptions {
    pub reply: MockReply,
    pub calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl MockCaptions {
    pub fn new(segments: &[&str]) -> Self {
        Self::with_reply(MockReply::Transcript(transcript_of("abc123", segments)))
    }

    pub fn not_found() -> Self {
        Self::with_reply(MockReply::NotFound)
    }

    pub fn failing(msg: &str) -> Self {
        Self::with_reply(MockReply::Fail(msg.to_string()))
    }

    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

pub fn transcript_of(video_id: &str, segments: &[&str]) -> Transcript {
    Transcript {
        video_id: video_id.to_string(),
        language: "en".to_string(),
        segments: segments
            .iter()
            .enumerate()
            .map(|(i, text)| Segment {
                start: i as f64 * 2.0,
                duration: 2.0,
                text: text.to_string(),
            })
            .collect(),
    }
}

impl CaptionsProvider for MockCaptions {
    async fn fetch_captions(&self, video_id: &str, languages: &[String]) -> Result<Transcript> {
        self.calls
            .lock()
            .unwrap()
            .push((video_id.to_string(), languages.to_vec()));

        match &self.reply {
            MockReply::Transcript(transcript) => Ok(Transcript {
                video_id: video_id.to_string(),
                ..transcript.clone()
            }),
            MockReply::NotFound => Err(TldwError::NoTranscriptFound {
                video_id: video_id.to_string(),
            }),
            MockReply::Fail(msg) => Err(TldwError::Api {
                status: 500,
                message: msg.clone(),
            }),
        }
    }
}
