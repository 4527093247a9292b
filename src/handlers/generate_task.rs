// POST /generate-task handler

use tracing::info;

use crate::error::ApiError;
use crate::models::{SuggestionRequest, SuggestionResponse};
use crate::state::AppState;

pub async fn generate_task_handler(
    request: SuggestionRequest,
    state: AppState,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(
        user_id = %request.user_id,
        todo_count = request.current_todos.len(),
        "POST /generate-task"
    );

    let suggestion = state
        .suggester
        .suggest(&request.current_todos)
        .await
        .map_err(ApiError::from)?;

    Ok(warp::reply::json(&SuggestionResponse { suggestion }))
}
