//! Error types for drishti-eye

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CameraError {
    /// Fatal misconfiguration caught at construction time (unknown stream
    /// kind, invalid calibration). Never raised mid-acquisition.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed or truncated frame bytes.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Network fetch failure, tagged with the endpoint that failed.
    #[error("Transport error: couldn't read url ({url}): {message}")]
    Transport { url: String, message: String },

    /// Projection requested without pixel alignment or an aligning transform.
    #[error("Unaligned input: {0}")]
    UnalignedInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl CameraError {
    pub(crate) fn transport(url: &str, err: reqwest::Error) -> Self {
        CameraError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_names_url() {
        let err = CameraError::Transport {
            url: "http://cam.local:8080/both".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("http://cam.local:8080/both"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_error_display_prefixes() {
        assert!(CameraError::Configuration("bad".into())
            .to_string()
            .contains("Configuration error"));
        assert!(CameraError::Decode("short".into())
            .to_string()
            .contains("Decode error"));
        assert!(CameraError::UnalignedInput("no transform".into())
            .to_string()
            .contains("Unaligned input"));
    }
}
