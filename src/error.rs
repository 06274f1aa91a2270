use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the key-value store and its adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be opened, created or locked.
    #[error("failed to open store at {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("storage engine error: {0}")]
    Engine(#[from] redb::Error),

    #[error("store is closed")]
    Closed,

    /// A blocking store task panicked or was cancelled.
    #[error("store task failed: {0}")]
    Task(String),
}

impl StoreError {
    pub fn open(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Open {
            path: path.into(),
            source: source.into(),
        }
    }
}

macro_rules! engine_error_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for StoreError {
                fn from(e: $ty) -> Self {
                    Self::Engine(e.into())
                }
            }
        )*
    };
}

engine_error_from!(
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

/// Errors raised while decoding a declarative redirect source.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed redirect declaration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to read redirect file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors a resolver surfaces to its caller instead of falling through.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("store lookup failed for {path}: {source}")]
    Store {
        path: String,
        #[source]
        source: StoreError,
    },

    /// The store returned a URL that cannot be sent as a `Location` header.
    #[error("stored URL for {path} is not a valid redirect location")]
    InvalidLocation { path: String, url: String },
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Unavailable { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Unavailable { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "unavailable",
                message,
                details,
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::Store { path, source } => match source {
                StoreError::Closed => {
                    AppError::unavailable("Redirect store is closed", json!({ "path": path }))
                }
                other => AppError::internal(
                    "Redirect store error",
                    json!({ "path": path, "reason": other.to_string() }),
                ),
            },
            ResolveError::InvalidLocation { path, url } => AppError::internal(
                "Invalid redirect location",
                json!({ "path": path, "url": url }),
            ),
        }
    }
}
