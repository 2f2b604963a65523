//! drishti-segment: point cloud to labeled objects
//!
//! Geometric segmentation over a calibrated point cloud: remove the
//! dominant planar surface, group the remaining points into spatially
//! coherent clusters, and extract a bounding box and centroid per cluster.

pub mod cluster;
pub mod error;
pub mod object;
pub mod params;
pub mod plane;
pub mod segmentation;

pub use error::SegmentError;
pub use object::Object;
pub use params::SegmentationParams;
pub use segmentation::ObjectSegmentation;
