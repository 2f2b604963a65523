//! Resource directory and the segmentation capability
//!
//! The directory is built and populated entirely outside this crate by the
//! owning process; the service only looks names up. Capability checks are
//! explicit accessors rather than runtime reflection: a resource either
//! offers a segmentation source or it does not.

use crate::error::ServiceError;
use async_trait::async_trait;
use drishti_core::PointCloud;
use drishti_eye::CalibratedCamera;
use std::collections::HashMap;
use std::sync::Arc;

/// The acquisition capability the segmentation service needs: one call
/// acquires a frame and projects it to a calibrated point cloud.
#[async_trait]
pub trait SegmentationSource: Send + Sync {
    async fn next_point_cloud(&self) -> Result<PointCloud, ServiceError>;
}

/// Anything registered in the resource directory. Resources opt into
/// capabilities by overriding the accessors.
pub trait Resource: Send + Sync {
    fn as_segmentation_source(&self) -> Option<&dyn SegmentationSource> {
        None
    }
}

#[async_trait]
impl SegmentationSource for CalibratedCamera {
    async fn next_point_cloud(&self) -> Result<PointCloud, ServiceError> {
        Ok(CalibratedCamera::next_point_cloud(self).await?)
    }
}

impl Resource for CalibratedCamera {
    fn as_segmentation_source(&self) -> Option<&dyn SegmentationSource> {
        Some(self)
    }
}

/// Name-to-resource map. Never mutated by the service.
#[derive(Default)]
pub struct ResourceDirectory {
    entries: HashMap<String, Arc<dyn Resource>>,
}

impl ResourceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, resource: Arc<dyn Resource>) {
        self.entries.insert(name.into(), resource);
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Resource>> {
        self.entries.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
