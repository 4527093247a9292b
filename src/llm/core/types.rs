//! Requests and responses exchanged with a chat provider

use super::sampling::SamplingParams;

/// One chat completion call
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Turns after the system prompt, oldest first
    pub messages: Vec<Message>,
    pub sampling: SamplingParams,
    /// Sent as the leading `system` turn when set
    pub system: Option<String>,
}

/// One conversation turn
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: text.into(),
        }
    }
}

/// Who wrote a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// First choice of a completion
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResponse {
    /// Text of the first choice, untouched
    pub text: String,
    /// Why generation stopped, when the provider says
    pub finish_reason: Option<FinishReason>,
    /// Token accounting, when the provider reports it
    pub usage: Option<UsageMetadata>,
}

/// Why the provider stopped generating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    /// `length`: ran into `max_tokens`
    MaxTokens,
    ContentFilter,
    /// Anything else, verbatim
    Other(String),
}

/// Token accounting reported with a completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageMetadata {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

impl UsageMetadata {
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens.saturating_add(output_tokens),
        }
    }
}

/// Chat models known to be served by the default provider.
///
/// Anything else configured through `LLM_MODEL` is carried as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatModel {
    /// Llama 3.1 8B, low latency
    Llama31_8bInstant,
    /// Llama 3.3 70B
    Llama33_70bVersatile,
    /// Any other model identifier the provider accepts
    Custom(String),
}

impl ChatModel {
    /// Identifier sent as `model`
    pub fn as_str(&self) -> &str {
        match self {
            ChatModel::Llama31_8bInstant => "llama-3.1-8b-instant",
            ChatModel::Llama33_70bVersatile => "llama-3.3-70b-versatile",
            ChatModel::Custom(id) => id,
        }
    }
}

impl Default for ChatModel {
    fn default() -> Self {
        ChatModel::Llama31_8bInstant
    }
}

impl From<&str> for ChatModel {
    fn from(id: &str) -> Self {
        match id {
            "llama-3.1-8b-instant" => ChatModel::Llama31_8bInstant,
            "llama-3.3-70b-versatile" => ChatModel::Llama33_70bVersatile,
            other => ChatModel::Custom(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content, "Hello");
    }

    #[test]
    fn test_message_role_wire_names() {
        assert_eq!(MessageRole::System.as_str(), "system");
        assert_eq!(MessageRole::User.as_str(), "user");
        assert_eq!(MessageRole::Assistant.as_str(), "assistant");
    }

    #[test]
    fn test_usage_metadata_new() {
        let usage = UsageMetadata::new(100, 50);
        assert_eq!(usage.total_tokens, 150);
    }

    #[test]
    fn test_usage_total_saturates() {
        let usage = UsageMetadata::new(u32::MAX, 10);
        assert_eq!(usage.total_tokens, u32::MAX);
    }

    #[test]
    fn test_chat_model_round_trips_known_ids() {
        assert_eq!(ChatModel::default().as_str(), "llama-3.1-8b-instant");
        assert_eq!(
            ChatModel::from("llama-3.3-70b-versatile"),
            ChatModel::Llama33_70bVersatile
        );
    }

    #[test]
    fn test_chat_model_keeps_unknown_ids() {
        let model = ChatModel::from("mixtral-8x7b-32768");
        assert_eq!(model, ChatModel::Custom("mixtral-8x7b-32768".to_string()));
        assert_eq!(model.as_str(), "mixtral-8x7b-32768");
    }
}
