//! Objects: a cluster plus its bounding geometry

use crate::error::SegmentError;
use drishti_core::{AxisAlignedBox, PointCloud, Vec3};

/// One segmented physical object. Built once by the extraction stage and
/// never mutated afterwards; it is owned by the response that carries it.
#[derive(Debug, Clone)]
pub struct Object {
    pub points: PointCloud,
    pub bounding_box: AxisAlignedBox,
    pub center: Vec3,
}

impl Object {
    /// Compute bounding box and centroid for a cluster. An empty point set
    /// is degenerate; the clusterer never produces one.
    pub fn from_points(points: PointCloud) -> Result<Object, SegmentError> {
        let center = points.centroid().ok_or_else(|| {
            SegmentError::Degenerate("cannot extract geometry from an empty point set".to_string())
        })?;
        let positions: Vec<Vec3> = points.positions().copied().collect();
        let bounding_box = AxisAlignedBox::enclosing(&positions).ok_or_else(|| {
            SegmentError::Degenerate("cannot bound an empty point set".to_string())
        })?;
        Ok(Object {
            points,
            bounding_box,
            center,
        })
    }
}
