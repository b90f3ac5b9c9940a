use crate::errors::WinfeedError;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Failed to query target window: {message}")]
    ProbeFailed { message: String },

    #[error("Window capture failed: {message}")]
    CaptureFailed { message: String },

    #[error("JPEG encoding failed: {message}")]
    EncodeFailed { message: String },

    #[error("JPEG encoder produced no data")]
    EmptyEncoding,
}

impl WinfeedError for CaptureError {
    fn error_code(&self) -> &'static str {
        match self {
            CaptureError::ProbeFailed { .. } => "CAPTURE_PROBE_FAILED",
            CaptureError::CaptureFailed { .. } => "CAPTURE_FAILED",
            CaptureError::EncodeFailed { .. } => "CAPTURE_ENCODE_FAILED",
            CaptureError::EmptyEncoding => "CAPTURE_EMPTY_ENCODING",
        }
    }
}
