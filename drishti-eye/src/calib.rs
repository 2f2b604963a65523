//! Camera calibration models and 2D→3D projection
//!
//! A camera carries exactly one calibration model, validated when the
//! configuration is loaded. The projector turns an acquired frame pair into
//! a point cloud: aligned pairs back-project directly through the color
//! intrinsics; unaligned pairs first remap the depth grid into the color
//! frame using the extrinsic or homography transform.

use crate::error::CameraError;
use crate::frame::{FramePair, RasterImage};
use drishti_core::{Point, PointCloud, Vec3};
use serde::{Deserialize, Serialize};

/// Pinhole camera parameters. Focal lengths and principal point are in
/// pixels; projected coordinates come out in the depth unit (millimeters).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PinholeIntrinsics {
    pub width: usize,
    pub height: usize,
    pub fx: f64,
    pub fy: f64,
    pub ppx: f64,
    pub ppy: f64,
}

impl PinholeIntrinsics {
    pub fn check_valid(&self) -> Result<(), CameraError> {
        if self.width == 0 || self.height == 0 {
            return Err(CameraError::Configuration(
                "intrinsics need nonzero image dimensions".to_string(),
            ));
        }
        if !(self.fx > 0.0) || !(self.fy > 0.0) {
            return Err(CameraError::Configuration(format!(
                "intrinsics need positive focal lengths, got fx={} fy={}",
                self.fx, self.fy
            )));
        }
        if !self.ppx.is_finite() || !self.ppy.is_finite() {
            return Err(CameraError::Configuration(
                "intrinsics principal point must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Back-project pixel (u, v) with depth `d` mm into camera coordinates.
    fn unproject(&self, u: f64, v: f64, d: f64) -> Vec3 {
        Vec3::new((u - self.ppx) * d / self.fx, (v - self.ppy) * d / self.fy, d)
    }

    /// Project a camera-frame point onto the pixel grid. `None` behind the
    /// camera.
    fn project_pixel(&self, p: &Vec3) -> Option<(f64, f64)> {
        if p.z <= 0.0 {
            return None;
        }
        Some((self.fx * p.x / p.z + self.ppx, self.fy * p.y / p.z + self.ppy))
    }
}

/// Rigid transform relating the depth sensor's frame to the color sensor's
/// frame, plus the intrinsics of both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepthColorExtrinsics {
    pub color: PinholeIntrinsics,
    pub depth: PinholeIntrinsics,
    /// Row-major 3x3 rotation, depth frame to color frame.
    pub rotation: [f64; 9],
    /// Translation in millimeters, depth frame to color frame.
    pub translation: [f64; 3],
}

impl DepthColorExtrinsics {
    pub fn check_valid(&self) -> Result<(), CameraError> {
        self.color.check_valid()?;
        self.depth.check_valid()?;
        if det3(&self.rotation).abs() < 1e-9 {
            return Err(CameraError::Configuration(
                "extrinsic rotation matrix is singular".to_string(),
            ));
        }
        Ok(())
    }

    fn transform(&self, p: &Vec3) -> Vec3 {
        let r = &self.rotation;
        let t = &self.translation;
        Vec3::new(
            r[0] * p.x + r[1] * p.y + r[2] * p.z + t[0],
            r[3] * p.x + r[4] * p.y + r[5] * p.z + t[1],
            r[6] * p.x + r[7] * p.y + r[8] * p.z + t[2],
        )
    }
}

/// Raw homography mapping depth pixels onto color pixels, for rigs without
/// a full extrinsic calibration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraHomography {
    pub color: PinholeIntrinsics,
    /// Row-major 3x3 homography, depth pixel to color pixel.
    pub homography: [f64; 9],
}

impl CameraHomography {
    pub fn check_valid(&self) -> Result<(), CameraError> {
        self.color.check_valid()?;
        if det3(&self.homography).abs() < 1e-12 {
            return Err(CameraError::Configuration(
                "homography matrix is singular".to_string(),
            ));
        }
        Ok(())
    }

    fn map_pixel(&self, u: f64, v: f64) -> Option<(f64, f64)> {
        let h = &self.homography;
        let w = h[6] * u + h[7] * v + h[8];
        if w.abs() < 1e-12 {
            return None;
        }
        Some((
            (h[0] * u + h[1] * v + h[2]) / w,
            (h[3] * u + h[4] * v + h[5]) / w,
        ))
    }
}

fn det3(m: &[f64; 9]) -> f64 {
    m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
        + m[2] * (m[3] * m[7] - m[4] * m[6])
}

/// The calibration carried by one camera. Exactly one variant is active;
/// which one decides how unaligned pairs are brought into correspondence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum CalibrationModel {
    Pinhole(PinholeIntrinsics),
    IntrinsicsExtrinsics(DepthColorExtrinsics),
    Homography(CameraHomography),
}

impl CalibrationModel {
    pub fn check_valid(&self) -> Result<(), CameraError> {
        match self {
            CalibrationModel::Pinhole(i) => i.check_valid(),
            CalibrationModel::IntrinsicsExtrinsics(e) => e.check_valid(),
            CalibrationModel::Homography(h) => h.check_valid(),
        }
    }

    /// The intrinsics of the frame points are expressed in once aligned.
    fn color_intrinsics(&self) -> &PinholeIntrinsics {
        match self {
            CalibrationModel::Pinhole(i) => i,
            CalibrationModel::IntrinsicsExtrinsics(e) => &e.color,
            CalibrationModel::Homography(h) => &h.color,
        }
    }
}

/// Projects aligned color+depth frames into 3D point clouds.
#[derive(Debug, Clone)]
pub struct Projector {
    model: CalibrationModel,
}

impl Projector {
    /// Invalid calibration is a fatal configuration error; this is the only
    /// place it is checked, so construction happens at config load time.
    pub fn new(model: CalibrationModel) -> Result<Self, CameraError> {
        model.check_valid()?;
        Ok(Self { model })
    }

    /// Project a frame pair into a point cloud with per-point color.
    ///
    /// Depth samples of 0 are "no return" and are excluded. A pair that is
    /// neither aligned nor coverable by the model's transform fails with an
    /// unaligned-input error.
    pub fn project(&self, frame: &FramePair) -> Result<PointCloud, CameraError> {
        let depth = frame.depth.as_ref().ok_or_else(|| {
            CameraError::UnalignedInput("frame has no depth map to project".to_string())
        })?;

        if frame.aligned {
            let intrinsics = self.model.color_intrinsics();
            let mut cloud = PointCloud::with_capacity(depth.width() * depth.height());
            for y in 0..depth.height() {
                for x in 0..depth.width() {
                    let d = depth.get(x, y);
                    if d == 0 {
                        continue;
                    }
                    let pos = intrinsics.unproject(x as f64, y as f64, d as f64);
                    cloud.set(make_point(pos, frame.color.as_ref(), x, y));
                }
            }
            return Ok(cloud);
        }

        match &self.model {
            CalibrationModel::Pinhole(_) => Err(CameraError::UnalignedInput(
                "pinhole calibration cannot align separate color and depth grids".to_string(),
            )),
            CalibrationModel::IntrinsicsExtrinsics(ext) => {
                let mut cloud = PointCloud::with_capacity(depth.width() * depth.height());
                for y in 0..depth.height() {
                    for x in 0..depth.width() {
                        let d = depth.get(x, y);
                        if d == 0 {
                            continue;
                        }
                        let in_depth = ext.depth.unproject(x as f64, y as f64, d as f64);
                        let in_color = ext.transform(&in_depth);
                        let color = ext
                            .color
                            .project_pixel(&in_color)
                            .and_then(|(u, v)| sample(frame.color.as_ref(), u, v));
                        cloud.set(Point { position: in_color, color });
                    }
                }
                Ok(cloud)
            }
            CalibrationModel::Homography(hom) => {
                let mut cloud = PointCloud::with_capacity(depth.width() * depth.height());
                for y in 0..depth.height() {
                    for x in 0..depth.width() {
                        let d = depth.get(x, y);
                        if d == 0 {
                            continue;
                        }
                        let Some((u, v)) = hom.map_pixel(x as f64, y as f64) else {
                            continue;
                        };
                        let pos = hom.color.unproject(u, v, d as f64);
                        let color = sample(frame.color.as_ref(), u, v);
                        cloud.set(Point { position: pos, color });
                    }
                }
                Ok(cloud)
            }
        }
    }
}

fn make_point(pos: Vec3, raster: Option<&RasterImage>, x: usize, y: usize) -> Point {
    match raster {
        Some(img) if img.in_bounds(x, y) => Point::with_color(pos, img.pixel(x, y)),
        _ => Point::new(pos),
    }
}

fn sample(raster: Option<&RasterImage>, u: f64, v: f64) -> Option<drishti_core::Color> {
    let img = raster?;
    if u < 0.0 || v < 0.0 {
        return None;
    }
    let (x, y) = (u.round() as usize, v.round() as usize);
    if img.in_bounds(x, y) {
        Some(img.pixel(x, y))
    } else {
        None
    }
}
