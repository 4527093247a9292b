// Route definitions

use std::convert::Infallible;
use warp::http::HeaderMap;
use warp::Filter;

use crate::cors::{self, CorsPolicy};
use crate::error::{handle_rejection, ApiError};
use crate::handlers;
use crate::state::AppState;

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// One path segment, percent-decoded. Segments that are not UTF-8 once
/// decoded are rejected as invalid input.
fn path_id() -> impl Filter<Extract = (String,), Error = warp::Rejection> + Clone {
    warp::path::param::<String>().and_then(|raw: String| async move {
        urlencoding::decode(&raw)
            .map(|decoded| decoded.into_owned())
            .map_err(|_| warp::reject::custom(ApiError::Validation("Invalid path parameter".to_string())))
    })
}

pub fn configure_routes(
    state: AppState,
    allowed_origin: &str,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    // GET /
    let health = warp::path::end()
        .and(warp::get())
        .and_then(handlers::health_handler);

    // GET /todos/{userId}
    let list_todos = warp::path("todos")
        .and(path_id())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::list_todos_handler);

    // POST /todos
    let create_todo = warp::path("todos")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(handlers::create_todo_handler);

    // PUT /todos/{todoId}
    let update_todo = warp::path("todos")
        .and(path_id())
        .and(warp::path::end())
        .and(warp::put())
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(handlers::update_todo_handler);

    // DELETE /todos/{todoId}
    let delete_todo = warp::path("todos")
        .and(path_id())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_state(state.clone()))
        .and_then(handlers::delete_todo_handler);

    // POST /generate-task
    let generate_task = warp::path("generate-task")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state))
        .and_then(handlers::generate_task_handler);

    let api = health
        .or(list_todos)
        .or(create_todo)
        .or(update_todo)
        .or(delete_todo)
        .or(generate_task)
        .recover(handle_rejection);

    let policy = CorsPolicy::new(allowed_origin);
    let api = warp::header::headers_cloned().and(api).map({
        let policy = policy.clone();
        move |headers: HeaderMap, reply| policy.decorate(&headers, reply)
    });

    cors::preflight(policy).or(api)
}
