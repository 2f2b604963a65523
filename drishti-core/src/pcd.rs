//! ASCII PCD (Point Cloud Data) encoding
//!
//! Minimal writer for the PCL interchange format, used when a caller asks
//! for raw object points in `pointcloud/pcd` form. Colored clouds emit an
//! `x y z rgb` layout with the color packed into one unsigned field; plain
//! clouds emit `x y z`.

use crate::pointcloud::PointCloud;
use std::fmt::Write;

/// Encode a cloud as an ASCII PCD document. Coordinates are written in
/// millimeters, matching the rest of the pipeline.
pub fn encode_ascii(cloud: &PointCloud) -> String {
    let colored = cloud.has_color();
    let n = cloud.len();
    let mut out = String::with_capacity(256 + n * 24);
    out.push_str("# .PCD v0.7 - Point Cloud Data file format\n");
    out.push_str("VERSION 0.7\n");
    if colored {
        out.push_str("FIELDS x y z rgb\n");
        out.push_str("SIZE 4 4 4 4\n");
        out.push_str("TYPE F F F U\n");
        out.push_str("COUNT 1 1 1 1\n");
    } else {
        out.push_str("FIELDS x y z\n");
        out.push_str("SIZE 4 4 4\n");
        out.push_str("TYPE F F F\n");
        out.push_str("COUNT 1 1 1\n");
    }
    let _ = writeln!(out, "WIDTH {n}");
    out.push_str("HEIGHT 1\n");
    out.push_str("VIEWPOINT 0 0 0 1 0 0 0\n");
    let _ = writeln!(out, "POINTS {n}");
    out.push_str("DATA ascii\n");

    for point in cloud.iter() {
        let p = point.position;
        if colored {
            let [r, g, b] = point.color.unwrap_or([0, 0, 0]);
            let rgb = ((r as u32) << 16) | ((g as u32) << 8) | (b as u32);
            let _ = writeln!(out, "{} {} {} {}", p.x, p.y, p.z, rgb);
        } else {
            let _ = writeln!(out, "{} {} {}", p.x, p.y, p.z);
        }
    }
    out
}
