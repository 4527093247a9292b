//! Conversion between the core LLM types and the chat completions wire format

use crate::llm::core::{
    error::LlmError,
    types::{ChatModel, FinishReason, GenerateRequest, GenerateResponse, MessageRole, UsageMetadata},
};

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Build the wire request. A system prompt becomes the leading `system` message.
pub fn to_chat_request(request: GenerateRequest, model: &ChatModel) -> ChatCompletionRequest {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);

    if let Some(system) = request.system {
        messages.push(ChatMessage {
            role: MessageRole::System.as_str().to_string(),
            content: system,
        });
    }

    messages.extend(request.messages.into_iter().map(|m| ChatMessage {
        role: m.role.as_str().to_string(),
        content: m.content,
    }));

    ChatCompletionRequest {
        model: model.as_str().to_string(),
        messages,
        temperature: request.sampling.temperature,
        max_tokens: request.sampling.max_tokens,
        stream: false,
    }
}

/// Take the first choice of a completion
pub fn from_chat_response(response: ChatCompletionResponse) -> Result<GenerateResponse, LlmError> {
    let usage = response
        .usage
        .map(|u| UsageMetadata::new(u.prompt_tokens, u.completion_tokens));

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::EmptyCompletion("response has no choices".to_string()))?;

    let text = choice
        .message
        .content
        .ok_or_else(|| LlmError::EmptyCompletion("first choice has no text content".to_string()))?;

    Ok(GenerateResponse {
        text,
        finish_reason: choice.finish_reason.as_deref().map(map_finish_reason),
        usage,
    })
}

fn map_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::MaxTokens,
        "content_filter" => FinishReason::ContentFilter,
        other => FinishReason::Other(other.to_string()),
    }
}
