//! Segmentation pipeline over one point cloud

use crate::cluster::cluster;
use crate::error::SegmentError;
use crate::object::Object;
use crate::params::SegmentationParams;
use crate::plane::remove_dominant_plane;
use drishti_core::PointCloud;
use tracing::debug;

/// The result of segmenting one cloud: plane removal, clustering, and
/// geometry extraction in sequence. All state is request-scoped.
pub struct ObjectSegmentation {
    objects: Vec<Object>,
}

impl ObjectSegmentation {
    pub fn new(cloud: PointCloud, params: &SegmentationParams) -> Result<Self, SegmentError> {
        params.validate()?;
        let total = cloud.len();
        let remaining = remove_dominant_plane(&cloud, params.min_points_in_plane);
        let clusters = cluster(
            &remaining,
            params.clustering_radius_mm,
            params.min_points_in_segment,
        );
        let objects = clusters
            .into_iter()
            .map(Object::from_points)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            total,
            after_plane = remaining.len(),
            objects = objects.len(),
            "segmented point cloud"
        );
        Ok(Self { objects })
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn into_objects(self) -> Vec<Object> {
        self.objects
    }
}
