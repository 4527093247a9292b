use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{
    error::{Result, StoreError},
    TodoStore, TODOS_TABLE,
};
use crate::models::{NewTodo, Todo, TodoPatch};

/// Todo store backed by the hosted database's PostgREST endpoint
/// (`{url}/rest/v1/todos`).
///
/// The service key goes out in both the `apikey` and bearer headers, which is
/// what the hosted gateway expects for server-side callers.
#[derive(Clone)]
pub struct RestTodoStore {
    http_client: Client,
    base_url: String,
    api_key: String,
}

/// PostgREST error body
#[derive(Debug, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    message: String,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

impl RestTodoStore {
    /// Create a store for the project at `base_url`.
    ///
    /// Nothing is sent until the first operation, so an empty URL or key
    /// only fails then.
    pub fn new(base_url: String, api_key: String) -> Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| StoreError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
            api_key,
        })
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            TODOS_TABLE
        )
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.http_client
            .request(method, self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Fail on non-2xx, otherwise decode the body as `T`
    async fn read_body<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(match serde_json::from_str::<PostgrestError>(&body) {
            Ok(err) => {
                let mut message = err.message;
                if let Some(details) = err.details.filter(|d| !d.is_empty()) {
                    message = format!("{} ({})", message, details);
                }
                if let Some(hint) = err.hint.filter(|h| !h.is_empty()) {
                    message = format!("{}; hint: {}", message, hint);
                }
                StoreError::Api {
                    status: status.as_u16(),
                    code: err.code.unwrap_or_else(|| status.as_u16().to_string()),
                    message,
                }
            }
            Err(_) => StoreError::Http {
                status: status.as_u16(),
                body,
            },
        })
    }
}

#[async_trait]
impl TodoStore for RestTodoStore {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Todo>> {
        debug!(user_id, "Selecting todos");
        let filter = format!("eq.{}", user_id);
        let response = self
            .request(Method::GET)
            .query(&[
                ("select", "*"),
                ("user_id", filter.as_str()),
                ("order", "created_at.desc"),
            ])
            .send()
            .await?;

        Self::read_body(response).await
    }

    async fn insert(&self, todo: NewTodo) -> Result<Todo> {
        debug!(user_id = %todo.user_id, "Inserting todo");
        let response = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&todo)
            .send()
            .await?;

        let rows: Vec<Todo> = Self::read_body(response).await?;
        rows.into_iter()
            .next()
            .ok_or(StoreError::EmptyResult("insert"))
    }

    async fn update(&self, todo_id: &str, patch: TodoPatch) -> Result<Vec<Todo>> {
        let changes = patch.changes();
        debug!(todo_id, fields = changes.len(), "Updating todo");

        let filter = format!("eq.{}", todo_id);
        let response = self
            .request(Method::PATCH)
            .query(&[("id", filter.as_str())])
            .header("Prefer", "return=representation")
            .json(&changes)
            .send()
            .await?;

        Self::read_body(response).await
    }

    async fn delete(&self, todo_id: &str) -> Result<()> {
        debug!(todo_id, "Deleting todo");
        let filter = format!("eq.{}", todo_id);
        let response = self
            .request(Method::DELETE)
            .query(&[("id", filter.as_str())])
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url() {
        let store = RestTodoStore::new(
            "https://abcd.supabase.co/".to_string(),
            "service-key".to_string(),
        )
        .unwrap();
        assert_eq!(store.table_url(), "https://abcd.supabase.co/rest/v1/todos");
    }
}
