//! OpenAI-compatible provider implementation
//!
//! Speaks the `/chat/completions` dialect shared by Groq, OpenAI and most
//! hosted inference gateways.

pub mod client;
pub mod mapper;
pub mod types;

pub use client::OpenAiClient;
