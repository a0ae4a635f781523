use serde::{Deserialize, Serialize};

use crate::build_prompt::Message;
use crate::config::Config;
use crate::error::RagError;
use crate::http::{openai_headers, post_json};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

pub fn generate_answer(cfg: &Config, messages: &[Message]) -> Result<String, RagError> {
    let url = format!("{}/chat/completions", cfg.openai_url);
    let req = ChatRequest {
        model: &cfg.chat_model,
        messages,
        temperature: cfg.temperature,
    };
    tracing::info!(model = %cfg.chat_model, "generating answer");
    let res: ChatResponse = post_json(cfg, &url, openai_headers(cfg)?, &req)?;
    res.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(RagError::EmptyCompletion)
}
