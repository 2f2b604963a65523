//! Robot config loading and explicit resource wiring

use anyhow::Context;
use drishti_api::ResourceDirectory;
use drishti_eye::{CalibratedCamera, CameraConfig, CameraError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Top-level robot configuration: every camera this process serves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotConfig {
    pub cameras: Vec<CameraEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraEntry {
    pub name: String,
    #[serde(flatten)]
    pub camera: CameraConfig,
}

pub fn load_config(path: &Path) -> anyhow::Result<RobotConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading robot config {}", path.display()))?;
    let config: RobotConfig = serde_json::from_str(&raw)
        .with_context(|| format!("parsing robot config {}", path.display()))?;
    Ok(config)
}

/// Construct every configured camera and register it by name. Invalid
/// configuration fails here, before the service ever runs.
pub fn build_directory(config: &RobotConfig) -> Result<ResourceDirectory, CameraError> {
    let mut directory = ResourceDirectory::new();
    for entry in &config.cameras {
        if directory.lookup(&entry.name).is_some() {
            return Err(CameraError::Configuration(format!(
                "duplicate camera name {:?}",
                entry.name
            )));
        }
        let camera = CalibratedCamera::from_config(&entry.camera)?;
        directory.insert(entry.name.clone(), Arc::new(camera));
        info!(name = %entry.name, "registered camera");
    }
    Ok(directory)
}
