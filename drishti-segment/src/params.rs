//! Tunable segmentation parameters

use crate::error::SegmentError;
use serde::{Deserialize, Serialize};

/// Numeric thresholds for one segmentation run. The point-count thresholds
/// are noise floors; the radius bounds how far apart two points of the same
/// object may sit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationParams {
    /// Minimum supporting points for a plane to be removed at all.
    pub min_points_in_plane: usize,
    /// Clusters smaller than this are discarded entirely.
    pub min_points_in_segment: usize,
    /// Maximum Euclidean distance, in millimeters, between neighbors within
    /// one object. Must be positive.
    pub clustering_radius_mm: f64,
    /// Requested encoding for returned point data. Advisory, not binding;
    /// segmentation itself ignores it.
    #[serde(default)]
    pub mime_type_hint: String,
}

impl SegmentationParams {
    pub fn validate(&self) -> Result<(), SegmentError> {
        if !self.clustering_radius_mm.is_finite() || self.clustering_radius_mm <= 0.0 {
            return Err(SegmentError::Parameters(format!(
                "clustering radius must be a positive number of millimeters, got {}",
                self.clustering_radius_mm
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_must_be_positive() {
        let mut params = SegmentationParams {
            min_points_in_plane: 0,
            min_points_in_segment: 0,
            clustering_radius_mm: 5.0,
            mime_type_hint: String::new(),
        };
        assert!(params.validate().is_ok());
        params.clustering_radius_mm = 0.0;
        assert!(params.validate().is_err());
        params.clustering_radius_mm = -1.0;
        assert!(params.validate().is_err());
        params.clustering_radius_mm = f64::NAN;
        assert!(params.validate().is_err());
    }
}
