//! drishti-eye: camera acquisition and 3D projection
//!
//! Normalizes heterogeneous camera backends (HTTP single/dual stream, local
//! files, static images) into calibrated color+depth frame pairs, and
//! projects those pairs into 3D point clouds using per-camera calibration.

pub mod calib;
pub mod camera;
pub mod codec;
pub mod config;
pub mod error;
pub mod frame;
pub mod source;

pub use calib::{CalibrationModel, PinholeIntrinsics, Projector};
pub use camera::CalibratedCamera;
pub use config::{CameraConfig, StreamKind};
pub use error::CameraError;
pub use frame::{DepthMap, FramePair, RasterImage};
pub use source::{
    DualServerSource, FileSource, FrameSource, ReleaseGuard, ServerSource, StaticSource,
};
