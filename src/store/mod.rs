//! Todo store adapters
//!
//! The service keeps no data of its own. Every operation is a single round
//! trip to a backing database, either through the hosted database's REST API
//! ([`RestTodoStore`]) or over a direct Postgres connection pool
//! ([`PgTodoStore`]).

pub mod error;
pub mod postgres;
pub mod rest;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::StoreConfig;
use crate::models::{NewTodo, Todo, TodoPatch};

pub use error::{Result, StoreError};
pub use postgres::PgTodoStore;
pub use rest::RestTodoStore;

/// Table holding todo rows
pub const TODOS_TABLE: &str = "todos";

/// CRUD over the todo table
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All todos owned by `user_id`, newest first. Empty when there are none.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Todo>>;

    /// Insert a row and return it with the store-assigned fields filled in
    async fn insert(&self, todo: NewTodo) -> Result<Todo>;

    /// Apply the present fields of `patch` to the row with `todo_id`.
    ///
    /// Returns the affected rows, empty when no row matched.
    async fn update(&self, todo_id: &str, patch: TodoPatch) -> Result<Vec<Todo>>;

    /// Delete the row with `todo_id`. Deleting a missing row is not an error.
    async fn delete(&self, todo_id: &str) -> Result<()>;
}

/// Build the store selected by configuration
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn TodoStore>> {
    match config {
        StoreConfig::Rest { url, api_key } => {
            let store = RestTodoStore::new(url.clone(), api_key.clone())?;
            Ok(Arc::new(store))
        }
        StoreConfig::Postgres { url, max_pool_size } => {
            let store = PgTodoStore::connect(url, *max_pool_size).await?;
            store.ensure_schema().await?;
            Ok(Arc::new(store))
        }
    }
}
