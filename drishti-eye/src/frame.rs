//! In-memory frame types: color rasters, depth maps, and paired frames

use crate::error::CameraError;
use drishti_core::pointcloud::Color;
use image::RgbImage;

/// A decoded color image. Immutable once built; the pipeline only ever
/// samples pixels from it.
#[derive(Debug, Clone)]
pub struct RasterImage {
    inner: RgbImage,
}

impl RasterImage {
    pub fn from_rgb(inner: RgbImage) -> Self {
        Self { inner }
    }

    pub fn width(&self) -> usize {
        self.inner.width() as usize
    }

    pub fn height(&self) -> usize {
        self.inner.height() as usize
    }

    /// Sample the pixel at (x, y). Callers must stay in bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.inner.get_pixel(x as u32, y as u32).0
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }
}

/// A 2D grid of depth samples in millimeters. A sample of 0 means the
/// sensor saw no return at that pixel.
#[derive(Debug, Clone)]
pub struct DepthMap {
    width: usize,
    height: usize,
    data: Vec<u16>,
}

impl DepthMap {
    pub fn new(width: usize, height: usize, data: Vec<u16>) -> Result<Self, CameraError> {
        if data.len() != width * height {
            return Err(CameraError::Decode(format!(
                "depth map size mismatch: {}x{} needs {} samples, got {}",
                width,
                height,
                width * height,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Depth at (x, y) in millimeters.
    pub fn get(&self, x: usize, y: usize) -> u16 {
        self.data[y * self.width + x]
    }

    /// Render the depth grid as a grayscale image so a depth-only stream
    /// still has a displayable raster. The pair built from it is aligned by
    /// construction.
    pub fn to_gray_image(&self) -> RasterImage {
        let mut img = RgbImage::new(self.width as u32, self.height as u32);
        for y in 0..self.height {
            for x in 0..self.width {
                let v = (self.get(x, y) >> 8) as u8;
                img.put_pixel(x as u32, y as u32, image::Rgb([v, v, v]));
            }
        }
        RasterImage::from_rgb(img)
    }
}

/// One acquired frame: color, depth, or both, plus whether the two grids
/// already share pixel correspondence.
#[derive(Debug, Clone)]
pub struct FramePair {
    pub color: Option<RasterImage>,
    pub depth: Option<DepthMap>,
    pub aligned: bool,
}

impl FramePair {
    /// Build a pair; at least one of color/depth must be present.
    pub fn new(
        color: Option<RasterImage>,
        depth: Option<DepthMap>,
        aligned: bool,
    ) -> Result<Self, CameraError> {
        if color.is_none() && depth.is_none() {
            return Err(CameraError::Decode(
                "frame pair needs at least one of color or depth".to_string(),
            ));
        }
        Ok(Self { color, depth, aligned })
    }

    pub fn color_only(color: RasterImage) -> Self {
        Self {
            color: Some(color),
            depth: None,
            aligned: false,
        }
    }

    /// A depth frame with its synthesized grayscale preview.
    pub fn from_depth(depth: DepthMap) -> Self {
        Self {
            color: Some(depth.to_gray_image()),
            depth: Some(depth),
            aligned: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_map_size_mismatch() {
        assert!(DepthMap::new(2, 2, vec![0u16; 3]).is_err());
        assert!(DepthMap::new(2, 2, vec![0u16; 4]).is_ok());
    }

    #[test]
    fn test_depth_preview_dimensions_and_scale() {
        let depth = DepthMap::new(2, 1, vec![0, 0xFF00]).unwrap();
        let pair = FramePair::from_depth(depth);
        assert!(pair.aligned);
        let img = pair.color.unwrap();
        assert_eq!((img.width(), img.height()), (2, 1));
        assert_eq!(img.pixel(0, 0), [0, 0, 0]);
        assert_eq!(img.pixel(1, 0), [0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_empty_pair_rejected() {
        assert!(FramePair::new(None, None, false).is_err());
    }
}
