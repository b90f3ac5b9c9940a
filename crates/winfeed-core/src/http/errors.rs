use crate::errors::WinfeedError;

/// Failures setting up the listening socket.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address '{addr}': {message}")]
    InvalidAddress { addr: String, message: String },

    #[error("Failed to bind {addr}: {source}")]
    BindFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

impl WinfeedError for ServerError {
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::InvalidAddress { .. } => "SERVER_INVALID_ADDRESS",
            ServerError::BindFailed { .. } => "SERVER_BIND_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, ServerError::InvalidAddress { .. })
    }
}

/// Reasons a single connection is dropped without a response.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request head exceeds {limit} bytes")]
    HeaderTooLarge { limit: usize },

    #[error("Connection closed before the request head was complete")]
    Incomplete,

    #[error("Malformed request line: {line}")]
    MalformedRequestLine { line: String },

    #[error("Timed out waiting for the client")]
    Timeout,
}

impl WinfeedError for RequestError {
    fn error_code(&self) -> &'static str {
        match self {
            RequestError::Io(_) => "REQUEST_IO_ERROR",
            RequestError::HeaderTooLarge { .. } => "REQUEST_HEADER_TOO_LARGE",
            RequestError::Incomplete => "REQUEST_INCOMPLETE",
            RequestError::MalformedRequestLine { .. } => "REQUEST_MALFORMED",
            RequestError::Timeout => "REQUEST_TIMEOUT",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(self, RequestError::Io(_))
    }
}
