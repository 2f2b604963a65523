//! Deduplicating point cloud keyed by coordinate
//!
//! Point identity is by coordinate: setting a point at a coordinate that is
//! already present replaces it rather than growing the cloud. Membership is
//! a hash lookup on a quantized coordinate key; iteration replays insertion
//! order so equal build sequences re-iterate identically.

use crate::geometry::Vec3;
use ahash::AHashMap;

/// Quantization step for the coordinate key, in millimeters. Two coordinates
/// closer than this along every axis are the same point.
pub const COORDINATE_QUANTUM_MM: f64 = 0.01;

/// 8-bit RGB color carried by a point.
pub type Color = [u8; 3];

/// A single point of a cloud, in millimeters, optionally colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub position: Vec3,
    pub color: Option<Color>,
}

impl Point {
    pub fn new(position: Vec3) -> Self {
        Self { position, color: None }
    }

    pub fn with_color(position: Vec3, color: Color) -> Self {
        Self { position, color: Some(color) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PointKey(i64, i64, i64);

impl PointKey {
    fn of(p: &Vec3) -> Self {
        let q = |v: f64| (v / COORDINATE_QUANTUM_MM).round() as i64;
        PointKey(q(p.x), q(p.y), q(p.z))
    }
}

/// A set of 3D points with set semantics on coordinates.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    index: AHashMap<PointKey, usize>,
    points: Vec<Point>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: AHashMap::with_capacity(capacity),
            points: Vec::with_capacity(capacity),
        }
    }

    /// Insert a point, replacing any existing point at the same coordinate.
    /// Replacement keeps the original insertion slot so iteration order is
    /// unaffected by duplicates.
    pub fn set(&mut self, point: Point) {
        let key = PointKey::of(&point.position);
        match self.index.get(&key) {
            Some(&i) => self.points[i] = point,
            None => {
                self.index.insert(key, self.points.len());
                self.points.push(point);
            }
        }
    }

    pub fn contains(&self, position: &Vec3) -> bool {
        self.index.contains_key(&PointKey::of(position))
    }

    pub fn get(&self, position: &Vec3) -> Option<&Point> {
        self.index
            .get(&PointKey::of(position))
            .map(|&i| &self.points[i])
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate points in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = &Vec3> {
        self.points.iter().map(|p| &p.position)
    }

    /// Mean of all point positions. `None` for an empty cloud.
    pub fn centroid(&self) -> Option<Vec3> {
        if self.points.is_empty() {
            return None;
        }
        let sum = self
            .points
            .iter()
            .fold(Vec3::ZERO, |acc, p| acc.add(&p.position));
        Some(sum.scale(1.0 / self.points.len() as f64))
    }

    pub fn has_color(&self) -> bool {
        self.points.iter().any(|p| p.color.is_some())
    }
}

impl FromIterator<Point> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut cloud = PointCloud::new();
        for p in iter {
            cloud.set(p);
        }
        cloud
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_deduplicates_by_coordinate() {
        let mut cloud = PointCloud::new();
        cloud.set(Point::new(Vec3::new(1.0, 2.0, 3.0)));
        cloud.set(Point::with_color(Vec3::new(1.0, 2.0, 3.0), [255, 0, 0]));
        assert_eq!(cloud.len(), 1);
        let p = cloud.get(&Vec3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(p.color, Some([255, 0, 0]));
    }

    #[test]
    fn test_membership() {
        let mut cloud = PointCloud::new();
        cloud.set(Point::new(Vec3::new(5.0, 5.0, 5.0)));
        assert!(cloud.contains(&Vec3::new(5.0, 5.0, 5.0)));
        assert!(!cloud.contains(&Vec3::new(5.0, 5.0, 6.0)));
    }

    #[test]
    fn test_iteration_is_insertion_ordered() {
        let mut cloud = PointCloud::new();
        let positions = [
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ];
        for p in &positions {
            cloud.set(Point::new(*p));
        }
        // A duplicate must not disturb the order.
        cloud.set(Point::new(Vec3::new(1.0, 0.0, 0.0)));
        let seen: Vec<Vec3> = cloud.positions().copied().collect();
        assert_eq!(seen, positions);
    }

    #[test]
    fn test_centroid() {
        let mut cloud = PointCloud::new();
        assert!(cloud.centroid().is_none());
        cloud.set(Point::new(Vec3::new(0.0, 0.0, 0.0)));
        cloud.set(Point::new(Vec3::new(2.0, 4.0, 6.0)));
        assert_eq!(cloud.centroid().unwrap(), Vec3::new(1.0, 2.0, 3.0));
    }
}
