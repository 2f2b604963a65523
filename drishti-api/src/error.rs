//! Error types for the service surface

use drishti_eye::CameraError;
use drishti_segment::SegmentError;
use thiserror::Error;

/// Error category surfaced to remote callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotFound,
    InvalidArgument,
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("resource {0:?} not found")]
    ResourceNotFound(String),

    #[error("expected implementation of vision.SegmentationSource, got resource {0:?}")]
    TypeMismatch(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Acquisition or projection failure, passed through unmodified.
    #[error(transparent)]
    Camera(#[from] CameraError),

    /// Segmentation stage failure, passed through unmodified.
    #[error(transparent)]
    Segmentation(#[from] SegmentError),

    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::ResourceNotFound(_) => ErrorCode::NotFound,
            ServiceError::TypeMismatch(_) | ServiceError::InvalidParameters(_) => {
                ErrorCode::InvalidArgument
            }
            ServiceError::Camera(_) | ServiceError::Segmentation(_) | ServiceError::Internal(_) => {
                ErrorCode::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_text() {
        let err = ServiceError::ResourceNotFound("fakeCamera".to_string());
        assert_eq!(err.to_string(), "resource \"fakeCamera\" not found");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_type_mismatch_text() {
        let err = ServiceError::TypeMismatch("gps1".to_string());
        assert!(err
            .to_string()
            .contains("expected implementation of vision.SegmentationSource"));
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
    }

    #[test]
    fn test_wrapped_errors_are_transparent() {
        let err: ServiceError = CameraError::Decode("short depth payload".to_string()).into();
        assert_eq!(err.to_string(), "Decode error: short depth payload");
        assert_eq!(err.code(), ErrorCode::Internal);
    }
}
