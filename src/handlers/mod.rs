// Handlers module

pub mod generate_task;
pub mod health;
pub mod todos;

pub use generate_task::generate_task_handler;
pub use health::health_handler;
pub use todos::{create_todo_handler, delete_todo_handler, list_todos_handler, update_todo_handler};
