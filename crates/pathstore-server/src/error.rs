use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pathstore_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Rejected before the store was called.
    #[error("{0}")]
    Validation(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A store write failed; `context` is what the client is told.
    #[error("{context}: {source}")]
    StoreFailure {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Wrap a store error from a write with the message shown to clients.
    pub fn store_failure(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::StoreFailure { context, source }
    }

    fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::Store(e) | Self::StoreFailure { source: e, .. } => Some(e),
            _ => None,
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        if let Self::Validation(_) = self {
            return StatusCode::BAD_REQUEST;
        }
        match self.store_error() {
            Some(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Some(e) if e.is_invalid_input() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Server-side failures stay generic.
    pub fn client_message(&self) -> String {
        match (self, self.store_error()) {
            (Self::Validation(msg), _) => msg.clone(),
            (_, Some(StoreError::NotFound(path))) => format!("Path '{path}' not found"),
            (_, Some(e)) if e.is_invalid_input() => e.to_string(),
            (Self::StoreFailure { context, .. }, _) => (*context).to_string(),
            (Self::Store(_), _) => "Database error".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, self.client_message()).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pathstore_types::PathKey;

    fn key(s: &str) -> PathKey {
        PathKey::new(s).unwrap()
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ServerError::from(StoreError::NotFound(key("docs/readme")));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.client_message(), "Path 'docs/readme' not found");
    }

    #[test]
    fn validation_maps_to_400() {
        let err = ServerError::Validation("content_type is required".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "content_type is required");
    }

    #[test]
    fn engine_errors_map_to_500_with_generic_message() {
        let read = ServerError::from(StoreError::EngineRead("disk on fire".into()));
        assert_eq!(read.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read.client_message(), "Database error");

        let write = ServerError::store_failure("Failed to store data")(StoreError::EngineWrite(
            "no space".into(),
        ));
        assert_eq!(write.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(write.client_message(), "Failed to store data");
    }

    #[test]
    fn invalid_value_maps_to_400() {
        let err = ServerError::store_failure("Failed to store data")(StoreError::InvalidValue {
            path: key("a"),
            source: pathstore_types::TypeError::EmptyContentType,
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
