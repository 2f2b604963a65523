//! Frame codec: raw bytes to typed images
//!
//! Three independent decode paths: a color image in any format the `image`
//! crate recognizes, a custom binary depth map, and a combined payload that
//! concatenates both behind a length prefix.
//!
//! Depth wire layout: big-endian u64 width, big-endian u64 height, then
//! width*height big-endian u16 samples in row-major order, millimeters.
//! Combined wire layout: big-endian u64 byte length of the color segment,
//! the color bytes, then a depth payload filling the remainder.

use crate::error::CameraError;
use crate::frame::{DepthMap, FramePair, RasterImage};

/// Upper bound on depth grid size, to reject absurd headers before
/// allocating.
const MAX_DEPTH_PIXELS: u64 = 100_000_000;

fn read_u64_be(data: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&data[..8]);
    u64::from_be_bytes(buf)
}

/// Decode a color image (PNG, JPEG, ...).
pub fn decode_color(data: &[u8]) -> Result<RasterImage, CameraError> {
    let img = image::load_from_memory(data)?;
    Ok(RasterImage::from_rgb(img.to_rgb8()))
}

/// Decode the custom binary depth format.
pub fn decode_depth(data: &[u8]) -> Result<DepthMap, CameraError> {
    if data.len() < 16 {
        return Err(CameraError::Decode(format!(
            "depth payload too short for header: {} bytes",
            data.len()
        )));
    }
    let width = read_u64_be(&data[0..8]);
    let height = read_u64_be(&data[8..16]);
    let pixels = width
        .checked_mul(height)
        .filter(|&n| n <= MAX_DEPTH_PIXELS)
        .ok_or_else(|| {
            CameraError::Decode(format!("unreasonable depth dimensions {width}x{height}"))
        })?;

    let body = &data[16..];
    let needed = (pixels as usize) * 2;
    if body.len() < needed {
        return Err(CameraError::Decode(format!(
            "depth payload truncated: {width}x{height} needs {needed} sample bytes, got {}",
            body.len()
        )));
    }
    let samples = body[..needed]
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect();
    DepthMap::new(width as usize, height as usize, samples)
}

/// Decode a combined color+depth payload.
///
/// The depth segment is decoded and validated before the color segment is
/// touched; a corrupt depth segment fails the whole frame without exposing
/// any partially built pair.
pub fn decode_both(data: &[u8], aligned: bool) -> Result<FramePair, CameraError> {
    if data.len() < 8 {
        return Err(CameraError::Decode(format!(
            "combined payload too short for length prefix: {} bytes",
            data.len()
        )));
    }
    let color_len = read_u64_be(&data[0..8]) as usize;
    let rest = &data[8..];
    if color_len > rest.len() {
        return Err(CameraError::Decode(format!(
            "combined payload truncated: color segment claims {color_len} bytes, {} remain",
            rest.len()
        )));
    }
    let (color_data, depth_data) = rest.split_at(color_len);

    let depth = decode_depth(depth_data)?;
    let color = decode_color(color_data)?;
    FramePair::new(Some(color), Some(depth), aligned)
}

/// Encode a depth map in the wire layout. The inverse of [`decode_depth`],
/// used by file writers and tests.
pub fn encode_depth(depth: &DepthMap) -> Vec<u8> {
    let mut out = Vec::with_capacity(16 + depth.width() * depth.height() * 2);
    out.extend_from_slice(&(depth.width() as u64).to_be_bytes());
    out.extend_from_slice(&(depth.height() as u64).to_be_bytes());
    for y in 0..depth.height() {
        for x in 0..depth.width() {
            out.extend_from_slice(&depth.get(x, y).to_be_bytes());
        }
    }
    out
}
