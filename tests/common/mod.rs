#![allow(dead_code)]

use ai_task_manager::llm::{GenerateRequest, GenerateResponse, LlmError, LlmProvider};
use ai_task_manager::models::{NewTodo, Todo, TodoPatch};
use ai_task_manager::state::AppState;
use ai_task_manager::store::{Result as StoreResult, StoreError, TodoStore};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use testcontainers::{core::WaitFor, GenericImage, RunnableImage};

pub const TEST_ORIGIN: &str = "http://localhost:3000";

/// Todo store kept in memory; counts every call that reaches it
#[derive(Default)]
pub struct InMemoryTodoStore {
    rows: Mutex<Vec<Todo>>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<Todo>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut todos: Vec<Todo> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(todos)
    }

    async fn insert(&self, todo: NewTodo) -> StoreResult<Todo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = Todo {
            id: format!("todo-{}", n),
            user_id: todo.user_id,
            title: todo.title,
            is_complete: false,
            created_at: Self::epoch() + Duration::seconds(n as i64),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(&self, todo_id: &str, patch: TodoPatch) -> StoreResult<Vec<Todo>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let mut updated = Vec::new();
        for row in rows.iter_mut().filter(|t| t.id == todo_id) {
            if let Some(title) = patch.title.value() {
                row.title = title.clone();
            }
            if let Some(is_complete) = patch.is_complete.value() {
                row.is_complete = *is_complete;
            }
            updated.push(row.clone());
        }
        Ok(updated)
    }

    async fn delete(&self, todo_id: &str) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.rows.lock().unwrap().retain(|t| t.id != todo_id);
        Ok(())
    }
}

/// Store whose every call fails like an unreachable upstream
pub struct UnavailableStore;

#[async_trait]
impl TodoStore for UnavailableStore {
    async fn list_for_user(&self, _user_id: &str) -> StoreResult<Vec<Todo>> {
        Err(unavailable())
    }

    async fn insert(&self, _todo: NewTodo) -> StoreResult<Todo> {
        Err(unavailable())
    }

    async fn update(&self, _todo_id: &str, _patch: TodoPatch) -> StoreResult<Vec<Todo>> {
        Err(unavailable())
    }

    async fn delete(&self, _todo_id: &str) -> StoreResult<()> {
        Err(unavailable())
    }
}

fn unavailable() -> StoreError {
    StoreError::Http {
        status: 503,
        body: "service unavailable".to_string(),
    }
}

/// Provider answering every request with the same text
pub struct StubProvider {
    reply: String,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl StubProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        self.requests.lock().unwrap().push(request);
        Ok(GenerateResponse {
            text: self.reply.clone(),
            finish_reason: None,
            usage: None,
        })
    }
}

/// Provider that always fails
pub struct FailingProvider;

#[async_trait]
impl LlmProvider for FailingProvider {
    async fn generate(&self, _request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        Err(LlmError::Transport("operation timed out".to_string()))
    }
}

pub fn state_with(store: Arc<dyn TodoStore>, provider: Arc<dyn LlmProvider>) -> AppState {
    AppState::new(store, provider)
}

/// Postgres image used by the direct store tests
pub const POSTGRES_IMAGE: &str = "postgres";
pub const POSTGRES_TAG: &str = "16-alpine";
pub const POSTGRES_PORT: u16 = 5432;
pub const POSTGRES_PASSWORD: &str = "todo_password";

pub fn create_postgres_container() -> RunnableImage<GenericImage> {
    let image = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
        .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ));

    RunnableImage::from(image).with_tag(POSTGRES_TAG)
}

pub fn build_connection_string(host: &str, port: u16) -> String {
    format!(
        "postgresql://postgres:{}@{}:{}/postgres",
        POSTGRES_PASSWORD, host, port
    )
}
