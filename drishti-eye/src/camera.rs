//! A camera source paired with its calibration

use crate::calib::Projector;
use crate::config::CameraConfig;
use crate::error::CameraError;
use crate::source::{DualServerSource, FileSource, FrameSource, ServerSource};
use drishti_core::PointCloud;
use tracing::info;

/// A frame source together with the projector that turns its frames into
/// point clouds. This is what gets registered in the resource directory.
pub struct CalibratedCamera {
    source: Box<dyn FrameSource>,
    projector: Projector,
}

impl CalibratedCamera {
    pub fn new(source: Box<dyn FrameSource>, projector: Projector) -> Self {
        Self { source, projector }
    }

    /// Build source and projector from a validated camera config. Cameras
    /// that should serve point clouds must carry calibration; its absence
    /// is a configuration error here, at wiring time.
    pub fn from_config(config: &CameraConfig) -> Result<Self, CameraError> {
        config.validate()?;
        let calibration = config.calibration().cloned().ok_or_else(|| {
            CameraError::Configuration(
                "camera needs calibration to serve point clouds".to_string(),
            )
        })?;
        let projector = Projector::new(calibration)?;
        let source: Box<dyn FrameSource> = match config {
            CameraConfig::SingleStream(c) => {
                info!(url = %c.url(), stream = %c.stream, "wiring single_stream camera");
                Box::new(ServerSource::new(c)?)
            }
            CameraConfig::DualStream(c) => {
                info!(color = %c.color_url, depth = %c.depth_url, "wiring dual_stream camera");
                Box::new(DualServerSource::new(c)?)
            }
            CameraConfig::File(c) => {
                info!(color = %c.color.display(), depth = %c.depth.display(), "wiring file camera");
                Box::new(FileSource::new(c)?)
            }
        };
        Ok(Self::new(source, projector))
    }

    /// Acquire one frame and project it. The frame and its release handle
    /// live only for the duration of this call.
    pub async fn next_point_cloud(&self) -> Result<PointCloud, CameraError> {
        let (pair, release) = self.source.next().await?;
        let cloud = self.projector.project(&pair)?;
        release.release();
        Ok(cloud)
    }

    pub fn is_aligned(&self) -> bool {
        self.source.is_aligned()
    }

    pub fn close(&self) {
        self.source.close();
    }
}
