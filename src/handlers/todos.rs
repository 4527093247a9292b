// /todos handlers

use tracing::info;

use crate::error::ApiError;
use crate::models::{DeleteResponse, NewTodo, TodoPatch};
use crate::state::AppState;

// GET /todos/{user_id}
pub async fn list_todos_handler(
    user_id: String,
    state: AppState,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(user_id = %user_id, "GET /todos/{{user_id}}");

    let todos = state
        .store
        .list_for_user(&user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(warp::reply::json(&todos))
}

// POST /todos
pub async fn create_todo_handler(
    request: NewTodo,
    state: AppState,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(user_id = %request.user_id, "POST /todos");

    let todo = state.store.insert(request).await.map_err(ApiError::from)?;

    Ok(warp::reply::json(&todo))
}

// PUT /todos/{todo_id}
pub async fn update_todo_handler(
    todo_id: String,
    patch: TodoPatch,
    state: AppState,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(todo_id = %todo_id, noop = patch.is_noop(), "PUT /todos/{{todo_id}}");

    let updated = state
        .store
        .update(&todo_id, patch)
        .await
        .map_err(ApiError::from)?;

    Ok(warp::reply::json(&updated))
}

// DELETE /todos/{todo_id}
pub async fn delete_todo_handler(
    todo_id: String,
    state: AppState,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(todo_id = %todo_id, "DELETE /todos/{{todo_id}}");

    state.store.delete(&todo_id).await.map_err(ApiError::from)?;

    Ok(warp::reply::json(&DeleteResponse::deleted()))
}
