//! LLM Abstraction Layer
//!
//! A small interface over chat-completion providers. The only backend is an
//! OpenAI-compatible HTTP API (Groq by default).

pub mod core;
pub mod openai;

// Re-export commonly used types
pub use core::{
    error::LlmError,
    provider::{create_provider, LlmProvider},
    sampling::SamplingParams,
    types::{
        ChatModel, FinishReason, GenerateRequest, GenerateResponse, Message, MessageRole,
        UsageMetadata,
    },
};
pub use openai::OpenAiClient;
