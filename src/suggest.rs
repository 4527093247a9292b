//! Next-task suggestions from the language model

use std::sync::Arc;
use tracing::debug;

use crate::llm::{GenerateRequest, LlmError, LlmProvider, Message, SamplingParams};

pub const SYSTEM_PROMPT: &str = "You are a productivity assistant.";

pub const SUGGESTION_TEMPERATURE: f32 = 0.5;

/// Prompt listing the user's current titles, one `- title` line each
pub fn build_prompt(current_todos: &[String]) -> String {
    let todo_list = current_todos
        .iter()
        .map(|title| format!("- {}", title))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Here is a user's current todo list:\n\
         {}\n\n\
         Based on this list, suggest exactly ONE short, actionable, and logical next task they should add.\n\
         Do not output any explanation, just the task title.",
        todo_list
    )
}

/// Asks the model for one follow-up task.
///
/// The single-task instruction lives in the prompt only. Whatever the model
/// answers is returned with surrounding whitespace trimmed and nothing else
/// removed.
#[derive(Clone)]
pub struct TaskSuggester {
    provider: Arc<dyn LlmProvider>,
}

impl TaskSuggester {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub fn request_for(current_todos: &[String]) -> GenerateRequest {
        GenerateRequest {
            messages: vec![Message::user(build_prompt(current_todos))],
            sampling: SamplingParams::default().with_temperature(SUGGESTION_TEMPERATURE),
            system: Some(SYSTEM_PROMPT.to_string()),
        }
    }

    pub async fn suggest(&self, current_todos: &[String]) -> Result<String, LlmError> {
        let request = Self::request_for(current_todos);
        let response = self.provider.generate(request).await?;
        debug!(raw = %response.text, "Model suggestion");
        Ok(response.text.trim().to_string())
    }
}
