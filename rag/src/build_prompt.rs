use crate::config::Config;
use crate::retrieve_chunks::RetrievedContext;

#[derive(Clone, Debug, serde::Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

pub fn build_prompt_with_context(
    cfg: &Config,
    question: &str,
    contexts: &[RetrievedContext],
) -> Vec<Message> {
    let context = format_contexts(contexts);

    let user_content = format!(
        "Answer the question using the following excerpts from \"The Peach Blossom Spring\".\n\n\
         [Retrieved excerpts]\n{}\n\n[Question]\n{}",
        context, question
    );

    vec![
        Message { role: "system".to_string(), content: cfg.system_prompt.clone() },
        Message { role: "user".to_string(), content: user_content },
    ]
}

/// Number and annotate each context in search order.
pub fn format_contexts(contexts: &[RetrievedContext]) -> String {
    contexts
        .iter()
        .enumerate()
        .map(|(i, ctx)| {
            let similarity = ctx
                .similarity
                .map(|s| format!("{:.4}", s))
                .unwrap_or_else(|| "N/A".to_string());
            let source = ctx.source.as_deref().unwrap_or("unknown");
            format!(
                "[Excerpt {}] similarity: {} | source: {}\ncontent:\n{}",
                i + 1,
                similarity,
                source,
                ctx.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}
