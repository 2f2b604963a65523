//! Error types for drishti-segment

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("Invalid parameters: {0}")]
    Parameters(String),

    #[error("Segmentation error: {0}")]
    Degenerate(String),
}
