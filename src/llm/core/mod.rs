//! Provider-independent request/response types, errors and the provider trait

pub mod error;
pub mod provider;
pub mod sampling;
pub mod types;
