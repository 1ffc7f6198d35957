use crate::{
    error::Result,
    llm::{ChatMessage, LanguageModel},
};

static SUMMARIZATION_PROMPT: &str = "Summarize the following text:\n\n{text}\n\nSummary:";

pub fn summarization_prompt(text: &str) -> String {
    SUMMARIZATION_PROMPT.replace("{text}", text)
}

/// Summarize one chunk; the model's answer is returned trimmed
#[tracing::instrument(skip_all, fields(model = model.model_name(), chars = chunk.len()))]
pub async fn summarize_chunk<M: LanguageModel>(model: &M, chunk: &str) -> Result<String> {
    let prompt = summarization_prompt(chunk);
    let response = model
        .chat(vec![ChatMessage::user(prompt)])
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize chunk"))?;

    Ok(response.trim().to_string())
}
