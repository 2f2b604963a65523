//! Typed camera configuration
//!
//! Each source variant has its own config struct, deserialized from the
//! robot's JSON config and validated eagerly at load time. Calibration is
//! checked here too, so a source is never constructed from an invalid
//! model.

use crate::calib::CalibrationModel;
use crate::error::CameraError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// What kind of payload a single-endpoint camera serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Color,
    Depth,
    Both,
}

impl FromStr for StreamKind {
    type Err = CameraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "color" => Ok(StreamKind::Color),
            "depth" => Ok(StreamKind::Depth),
            "both" => Ok(StreamKind::Both),
            other => Err(CameraError::Configuration(format!(
                "do not know how to decode stream kind {other:?} (want color, depth, or both)"
            ))),
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Color => write!(f, "color"),
            StreamKind::Depth => write!(f, "depth"),
            StreamKind::Both => write!(f, "both"),
        }
    }
}

/// One endpoint serving color, depth, or a combined payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleStreamConfig {
    pub host: String,
    pub port: u16,
    /// Path component appended to the endpoint URL.
    #[serde(default)]
    pub path: String,
    /// Stream kind as configured; parsed and validated at load time.
    pub stream: String,
    #[serde(default)]
    pub aligned: bool,
    #[serde(default)]
    pub calibration: Option<CalibrationModel>,
}

impl SingleStreamConfig {
    pub fn url(&self) -> String {
        format!("http://{}:{}/{}", self.host, self.port, self.path)
    }

    pub fn stream_kind(&self) -> Result<StreamKind, CameraError> {
        self.stream.parse()
    }

    pub fn validate(&self) -> Result<(), CameraError> {
        if self.host.is_empty() {
            return Err(CameraError::Configuration(
                "single_stream camera needs a host".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(CameraError::Configuration(
                "single_stream camera needs a nonzero port".to_string(),
            ));
        }
        self.stream_kind()?;
        if let Some(calibration) = &self.calibration {
            calibration.check_valid()?;
        }
        Ok(())
    }
}

/// Two endpoints, one per modality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DualStreamConfig {
    pub color_url: String,
    pub depth_url: String,
    /// Whether the two grids already share pixel correspondence.
    #[serde(default)]
    pub aligned: bool,
    #[serde(default)]
    pub calibration: Option<CalibrationModel>,
}

impl DualStreamConfig {
    pub fn validate(&self) -> Result<(), CameraError> {
        if self.color_url.is_empty() || self.depth_url.is_empty() {
            return Err(CameraError::Configuration(
                "dual_stream camera needs color and depth urls".to_string(),
            ));
        }
        if let Some(calibration) = &self.calibration {
            calibration.check_valid()?;
        }
        Ok(())
    }
}

/// Local color and depth files read on every acquisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub color: PathBuf,
    pub depth: PathBuf,
    #[serde(default)]
    pub aligned: bool,
    #[serde(default)]
    pub calibration: Option<CalibrationModel>,
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), CameraError> {
        if self.color.as_os_str().is_empty() || self.depth.as_os_str().is_empty() {
            return Err(CameraError::Configuration(
                "file camera needs color and depth paths".to_string(),
            ));
        }
        if let Some(calibration) = &self.calibration {
            calibration.check_valid()?;
        }
        Ok(())
    }
}

/// A camera definition in the robot config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraConfig {
    SingleStream(SingleStreamConfig),
    DualStream(DualStreamConfig),
    File(FileConfig),
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), CameraError> {
        match self {
            CameraConfig::SingleStream(c) => c.validate(),
            CameraConfig::DualStream(c) => c.validate(),
            CameraConfig::File(c) => c.validate(),
        }
    }

    pub fn calibration(&self) -> Option<&CalibrationModel> {
        match self {
            CameraConfig::SingleStream(c) => c.calibration.as_ref(),
            CameraConfig::DualStream(c) => c.calibration.as_ref(),
            CameraConfig::File(c) => c.calibration.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(stream: &str) -> SingleStreamConfig {
        SingleStreamConfig {
            host: "cam.local".to_string(),
            port: 8080,
            path: "frame".to_string(),
            stream: stream.to_string(),
            aligned: true,
            calibration: None,
        }
    }

    #[test]
    fn test_stream_kind_parse() {
        assert_eq!("color".parse::<StreamKind>().unwrap(), StreamKind::Color);
        assert_eq!("depth".parse::<StreamKind>().unwrap(), StreamKind::Depth);
        assert_eq!("both".parse::<StreamKind>().unwrap(), StreamKind::Both);
        assert!("video".parse::<StreamKind>().is_err());
    }

    #[test]
    fn test_single_stream_url() {
        assert_eq!(single("both").url(), "http://cam.local:8080/frame");
    }

    #[test]
    fn test_unknown_stream_kind_fails_validation() {
        let err = single("video").validate().unwrap_err();
        assert!(matches!(err, CameraError::Configuration(_)));
        assert!(err.to_string().contains("video"));
    }

    #[test]
    fn test_dual_stream_needs_both_urls() {
        let cfg = DualStreamConfig {
            color_url: "http://cam.local/color".to_string(),
            depth_url: String::new(),
            aligned: false,
            calibration: None,
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_camera_config_json_roundtrip() {
        let json = serde_json::json!({
            "kind": "single_stream",
            "host": "cam.local",
            "port": 8080,
            "path": "frame",
            "stream": "both",
            "aligned": true,
        });
        let cfg: CameraConfig = serde_json::from_value(json).unwrap();
        assert!(cfg.validate().is_ok());
        assert!(matches!(cfg, CameraConfig::SingleStream(_)));
    }

    #[test]
    fn test_invalid_calibration_fails_at_load() {
        let json = serde_json::json!({
            "kind": "file",
            "color": "color.png",
            "depth": "depth.bin",
            "aligned": true,
            "calibration": {
                "model": "pinhole",
                "width": 0, "height": 0,
                "fx": 500.0, "fy": 500.0, "ppx": 320.0, "ppy": 240.0,
            },
        });
        let cfg: CameraConfig = serde_json::from_value(json).unwrap();
        assert!(matches!(
            cfg.validate(),
            Err(CameraError::Configuration(_))
        ));
    }
}
