use crate::errors::WinfeedError;

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Window not found: tried titles {titles:?} and substring {pattern:?}")]
    WindowNotFound {
        titles: Vec<String>,
        pattern: Option<String>,
    },

    #[error("Failed to enumerate windows: {message}")]
    EnumerationFailed { message: String },
}

impl WinfeedError for WindowError {
    fn error_code(&self) -> &'static str {
        match self {
            WindowError::WindowNotFound { .. } => "WINDOW_NOT_FOUND",
            WindowError::EnumerationFailed { .. } => "WINDOW_ENUMERATION_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, WindowError::WindowNotFound { .. })
    }
}
