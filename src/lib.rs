// HTTP server modules
pub mod cors;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

// Configuration
pub mod config;

// Todo store adapters
pub mod store;

// LLM abstraction layer and task suggestions
pub mod llm;
pub mod suggest;
