//! drishti-core: shared geometry and point cloud types
//!
//! Leaf types used by every other drishti crate: 3D vectors and boxes in
//! millimeters, the deduplicating `PointCloud` set, and the ASCII PCD
//! encoding used when callers request raw point data over the wire.

pub mod geometry;
pub mod pcd;
pub mod pointcloud;

pub use geometry::{AxisAlignedBox, Vec3};
pub use pointcloud::{Color, Point, PointCloud};
