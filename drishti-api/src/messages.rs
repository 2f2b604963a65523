//! Request and response types for the segmentation service

use drishti_core::{pcd, AxisAlignedBox, Vec3};
use drishti_segment::{Object, SegmentationParams};
use serde::{Deserialize, Serialize};

/// MIME type for ASCII PCD point data. The only encoding we serve raw
/// points in; other hints return geometry only.
pub const MIME_TYPE_PCD: &str = "pointcloud/pcd";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetObjectPointCloudsRequest {
    /// Target camera resource identifier.
    pub name: String,
    /// Requested point-cloud encoding. A hint, not binding.
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub min_points_in_plane: usize,
    #[serde(default)]
    pub min_points_in_segment: usize,
    pub clustering_radius_mm: f64,
}

impl GetObjectPointCloudsRequest {
    pub fn params(&self) -> SegmentationParams {
        SegmentationParams {
            min_points_in_plane: self.min_points_in_plane,
            min_points_in_segment: self.min_points_in_segment,
            clustering_radius_mm: self.clustering_radius_mm,
            mime_type_hint: self.mime_type.clone(),
        }
    }
}

/// One segmented object on the wire: bounding geometry always, raw point
/// data only when the caller asked for an encoding we serve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointCloudObject {
    pub center: Vec3,
    pub bounding_box: AxisAlignedBox,
    pub point_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_cloud: Option<String>,
}

impl PointCloudObject {
    pub fn from_object(object: &Object, encode_points: bool) -> Self {
        Self {
            center: object.center,
            bounding_box: object.bounding_box,
            point_count: object.points.len(),
            point_cloud: encode_points.then(|| pcd::encode_ascii(&object.points)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetObjectPointCloudsResponse {
    /// The encoding actually used for `point_cloud` fields; empty when no
    /// raw point data was included.
    #[serde(default)]
    pub mime_type: String,
    pub objects: Vec<PointCloudObject>,
}
