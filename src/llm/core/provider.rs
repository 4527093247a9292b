//! Provider trait for LLM implementations

use async_trait::async_trait;

use super::{
    error::LlmError,
    types::{ChatModel, GenerateRequest, GenerateResponse},
};
use crate::llm::openai::OpenAiClient;

/// Main interface that all LLM provider implementations must satisfy
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one chat completion and return the first choice.
    ///
    /// Exactly one request is sent; failures are not retried.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError>;
}

/// Create an LLM provider for an OpenAI-compatible chat completions API
///
/// # Arguments
///
/// * `api_base` - Base URL up to (not including) `/chat/completions`
/// * `api_key` - Bearer key; an empty key is sent as-is and rejected upstream
/// * `model` - Model identifier
///
/// # Example
///
/// ```rust,no_run
/// use ai_task_manager::llm::{create_provider, ChatModel};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = create_provider(
///     "https://api.groq.com/openai/v1".to_string(),
///     "gsk_...".to_string(),
///     ChatModel::Llama31_8bInstant,
/// )?;
/// # Ok(())
/// # }
/// ```
pub fn create_provider(
    api_base: String,
    api_key: String,
    model: ChatModel,
) -> Result<Box<dyn LlmProvider>, LlmError> {
    let client = OpenAiClient::new(api_base, api_key, model)?;
    Ok(Box::new(client))
}
