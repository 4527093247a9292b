use std::sync::Arc;

use crate::llm::LlmProvider;
use crate::store::TodoStore;
use crate::suggest::TaskSuggester;

/// Long-lived client handles shared by every request
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
    pub suggester: TaskSuggester,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>, provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            store,
            suggester: TaskSuggester::new(provider),
        }
    }
}
