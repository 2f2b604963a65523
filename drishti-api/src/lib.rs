//! drishti-api: the remote-callable segmentation contract
//!
//! Request/response types for `GetObjectPointClouds`, the resource
//! directory collaborator interface, and the server-side dispatch that
//! looks up a camera resource, checks its capability, and runs the
//! acquisition-to-segmentation pipeline.

pub mod error;
pub mod messages;
pub mod resource;
pub mod service;

pub use error::{ErrorCode, ServiceError};
pub use messages::{
    GetObjectPointCloudsRequest, GetObjectPointCloudsResponse, PointCloudObject, MIME_TYPE_PCD,
};
pub use resource::{Resource, ResourceDirectory, SegmentationSource};
pub use service::VisionServer;
