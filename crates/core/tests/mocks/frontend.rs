use tldw_core::{Frontend, Progress, Transcript};

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Busy(String),
    Idle,
    Transcript(String),
    Summary(String),
    Error(String),
    Progress(Progress),
}

#[derive(Debug, Default)]
pub struct RecordingFrontend {
    pub events: Vec<UiEvent>,
}

impl RecordingFrontend {
    pub fn errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Error(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn transcripts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Transcript(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn summaries(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Summary(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_progress(&self) -> Option<Progress> {
        self.events.iter().rev().find_map(|e| match e {
            UiEvent::Progress(p) => Some(*p),
            _ => None,
        })
    }
}

impl Frontend for RecordingFrontend {
    fn busy(&mut self, message: &str) {
        self.events.push(UiEvent::Busy(message.to_string()));
    }

    fn idle(&mut self) {
        self.events.push(UiEvent::Idle);
    }

    fn transcript(&mut self, transcript: &Transcript) {
        self.events.push(UiEvent::Transcript(transcript.text()));
    }

    fn summary(&mut self, summary: &str) {
        self.events.push(UiEvent::Summary(summary.to_string()));
    }

    fn error(&mut self, message: &str) {
        self.events.push(UiEvent::Error(message.to_string()));
    }

    fn progress(&mut self, progress: Progress) {
        self.events.push(UiEvent::Progress(progress));
    }
}
