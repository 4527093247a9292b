use thiserror::Error;

/// Result type for todo store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by todo store adapters
#[derive(Debug, Error)]
pub enum StoreError {
    /// Non-2xx from the REST API with an unrecognised body
    #[error("HTTP error (status {status}): {body}")]
    Http { status: u16, body: String },

    /// Structured error from the REST API
    #[error("Store API error ({code}, status {status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Connection error - database unreachable or bad connection string
    #[error("Connection error: {0}")]
    Connection(String),

    /// Database error - SQL errors, constraint violations
    #[error("Database error: {0}")]
    Database(String),

    /// Pool error - connection pool issues
    #[error("Pool error: {0}")]
    Pool(String),

    /// Response did not decode into todo rows
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A write that must return a row returned none
    #[error("Store returned no row for {0}")]
    EmptyResult(&'static str),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            return StoreError::Connection(err.to_string());
        }
        StoreError::Http {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            body: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(err: tokio_postgres::Error) -> Self {
        if let Some(db_error) = err.as_db_error() {
            return StoreError::Database(format!(
                "{}: {}",
                db_error.code().code(),
                db_error.message()
            ));
        }

        StoreError::Database(format!("{:?}", err))
    }
}

impl From<deadpool_postgres::PoolError> for StoreError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        StoreError::Pool(err.to_string())
    }
}

impl From<deadpool_postgres::BuildError> for StoreError {
    fn from(err: deadpool_postgres::BuildError) -> Self {
        StoreError::Connection(err.to_string())
    }
}
