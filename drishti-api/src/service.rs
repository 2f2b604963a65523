//! Server-side dispatch for `GetObjectPointClouds`

use crate::error::ServiceError;
use crate::messages::{
    GetObjectPointCloudsRequest, GetObjectPointCloudsResponse, PointCloudObject, MIME_TYPE_PCD,
};
use crate::resource::ResourceDirectory;
use drishti_segment::{ObjectSegmentation, SegmentError};
use std::sync::Arc;
use tracing::info;

/// The vision service. Each call is an independent unit of work over
/// request-scoped state; the directory itself is read-only here.
pub struct VisionServer {
    directory: Arc<ResourceDirectory>,
}

impl VisionServer {
    pub fn new(directory: Arc<ResourceDirectory>) -> Self {
        Self { directory }
    }

    /// Look up the named camera, acquire and project one frame, segment it,
    /// and return the objects found. Stage errors propagate unmodified.
    pub async fn get_object_point_clouds(
        &self,
        request: &GetObjectPointCloudsRequest,
    ) -> Result<GetObjectPointCloudsResponse, ServiceError> {
        let params = request.params();
        params.validate().map_err(|e| match e {
            SegmentError::Parameters(msg) => ServiceError::InvalidParameters(msg),
            other => other.into(),
        })?;

        let resource = self
            .directory
            .lookup(&request.name)
            .ok_or_else(|| ServiceError::ResourceNotFound(request.name.clone()))?;
        let source = resource
            .as_segmentation_source()
            .ok_or_else(|| ServiceError::TypeMismatch(request.name.clone()))?;

        let cloud = source.next_point_cloud().await?;
        let segmentation = ObjectSegmentation::new(cloud, &params)?;

        let encode_points = request.mime_type == MIME_TYPE_PCD;
        let objects: Vec<PointCloudObject> = segmentation
            .objects()
            .iter()
            .map(|o| PointCloudObject::from_object(o, encode_points))
            .collect();
        info!(
            camera = %request.name,
            objects = objects.len(),
            "served object point clouds"
        );
        Ok(GetObjectPointCloudsResponse {
            mime_type: if encode_points {
                MIME_TYPE_PCD.to_string()
            } else {
                String::new()
            },
            objects,
        })
    }
}
