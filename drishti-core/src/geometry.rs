//! 3D vectors and bounding geometry, in millimeters

use serde::{Deserialize, Serialize};

/// A 3D vector or point in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn add(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(&self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Vec3) -> f64 {
        self.sub(other).norm()
    }
}

/// An axis-aligned box described by its center and full edge lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAlignedBox {
    pub center: Vec3,
    /// Full extent along each axis, in millimeters.
    pub dims: Vec3,
}

impl AxisAlignedBox {
    pub fn new(center: Vec3, dims: Vec3) -> Self {
        Self { center, dims }
    }

    /// The smallest box enclosing all of `points`. Returns `None` for an
    /// empty slice.
    pub fn enclosing(points: &[Vec3]) -> Option<Self> {
        let first = points.first()?;
        let (mut min, mut max) = (*first, *first);
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        Some(Self {
            center: min.add(&max).scale(0.5),
            dims: max.sub(&min),
        })
    }

    pub fn min_corner(&self) -> Vec3 {
        self.center.sub(&self.dims.scale(0.5))
    }

    pub fn max_corner(&self) -> Vec3 {
        self.center.add(&self.dims.scale(0.5))
    }

    /// Compare two boxes within a per-component tolerance.
    pub fn almost_equal(&self, other: &AxisAlignedBox, tol_mm: f64) -> bool {
        let dc = self.center.sub(&other.center);
        let dd = self.dims.sub(&other.dims);
        dc.x.abs() <= tol_mm
            && dc.y.abs() <= tol_mm
            && dc.z.abs() <= tol_mm
            && dd.x.abs() <= tol_mm
            && dd.y.abs() <= tol_mm
            && dd.z.abs() <= tol_mm
    }

    /// True if the interiors of the two boxes intersect by more than `tol_mm`
    /// along every axis.
    pub fn overlaps(&self, other: &AxisAlignedBox, tol_mm: f64) -> bool {
        let (a_min, a_max) = (self.min_corner(), self.max_corner());
        let (b_min, b_max) = (other.min_corner(), other.max_corner());
        a_min.x < b_max.x - tol_mm
            && b_min.x < a_max.x - tol_mm
            && a_min.y < b_max.y - tol_mm
            && b_min.y < a_max.y - tol_mm
            && a_min.z < b_max.z - tol_mm
            && b_min.z < a_max.z - tol_mm
    }
}
