// Data structures (Todo, patches, request/response bodies)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// Todo row as stored by the backing database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
}

// Stores may key rows by bigint instead of uuid; ids stay opaque strings here.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

// POST /todos body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub user_id: String,
}

/// One field of a partial update.
///
/// `Absent` (key missing) and `Null` (key present with `null`) are both
/// skipped when the patch is applied; only `Value` reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            Patch::Absent | Patch::Null => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Patch::Null)
    }
}

// Only reached when the key is present; missing keys fall back to Default.
impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

// PUT /todos/{todo_id} body
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TodoPatch {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub is_complete: Patch<bool>,
}

impl TodoPatch {
    /// Column/value pairs that will actually be written
    pub fn changes(&self) -> Map<String, Value> {
        let mut changes = Map::new();
        if let Some(title) = self.title.value() {
            changes.insert("title".to_string(), Value::String(title.clone()));
        }
        if let Some(is_complete) = self.is_complete.value() {
            changes.insert("is_complete".to_string(), Value::Bool(*is_complete));
        }
        changes
    }

    pub fn is_noop(&self) -> bool {
        self.title.value().is_none() && self.is_complete.value().is_none()
    }
}

// POST /generate-task body
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuggestionRequest {
    pub user_id: String,
    pub current_todos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn running() -> Self {
        Self {
            status: "Backend is running".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Deleted".to_string(),
        }
    }
}

// Error body, same shape for every failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
