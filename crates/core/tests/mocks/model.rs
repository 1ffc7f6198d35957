use std::sync::{Arc, Mutex};
use tldw_core::{ChatMessage, LanguageModel, Result, TldwError};

/// Replies follow `script` call by call; `None` makes that call fail.
/// Calls past the end of the script get `"summary"`.
#[derive(Clone)]
pub struct MockModel {
    pub script: Vec<Option<String>>,
    pub calls: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl MockModel {
    pub fn new(script: &[Option<&str>]) -> Self {
        Self {
            script: script.iter().map(|r| r.map(String::from)).collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn always(reply: &str) -> Self {
        Self::new(&[Some(reply)])
    }
}

impl LanguageModel for MockModel {
    fn model_name(&self) -> &str {
        "mock-llama"
    }

    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(messages);
            calls.len() - 1
        };

        match self.script.get(index) {
            Some(Some(reply)) => Ok(reply.clone()),
            Some(None) => Err(TldwError::Api {
                status: 500,
                message: format!("model crashed on call {index}"),
            }),
            None => Ok(self.script.last().cloned().flatten().unwrap_or_else(|| "summary".into())),
        }
    }
}
