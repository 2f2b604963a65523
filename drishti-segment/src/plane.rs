//! Dominant plane removal
//!
//! RANSAC-style consensus fit: candidate planes are spanned by point
//! triples drawn from a seeded generator, and the plane with the most
//! inliers wins. The seed is fixed, so the fit is deterministic for a given
//! input cloud and parameter set.

use drishti_core::{PointCloud, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Seed for the triple-sampling generator. Fixed so repeated runs over the
/// same cloud pick the same plane.
pub const PLANE_FIT_SEED: u64 = 0x1f2e_3d4c_5b6a_7988;

/// Number of candidate triples examined per fit.
pub const PLANE_FIT_ITERATIONS: usize = 200;

/// Perpendicular distance, in millimeters, within which a point counts as
/// part of a candidate plane and is removed with it.
pub const PLANE_INLIER_TOLERANCE_MM: f64 = 10.0;

struct Plane {
    normal: Vec3,
    offset: f64,
}

impl Plane {
    /// Plane spanned by three points. `None` if they are (near) collinear.
    fn from_triple(a: &Vec3, b: &Vec3, c: &Vec3) -> Option<Plane> {
        let normal = b.sub(a).cross(&c.sub(a));
        let norm = normal.norm();
        if norm < 1e-9 {
            return None;
        }
        let normal = normal.scale(1.0 / norm);
        Some(Plane {
            offset: -normal.dot(a),
            normal,
        })
    }

    fn distance(&self, p: &Vec3) -> f64 {
        (self.normal.dot(p) + self.offset).abs()
    }
}

/// Remove the best-supported plane from the cloud.
///
/// If no plane reaches `min_points_in_plane` inliers the input is returned
/// unchanged: the absence of a strong planar surface is a no-op, not an
/// error. Otherwise every point within [`PLANE_INLIER_TOLERANCE_MM`] of the
/// winning plane is dropped and the rest keep their iteration order.
pub fn remove_dominant_plane(cloud: &PointCloud, min_points_in_plane: usize) -> PointCloud {
    let positions: Vec<Vec3> = cloud.positions().copied().collect();
    if positions.len() < 3 {
        return cloud.clone();
    }

    let mut rng = StdRng::seed_from_u64(PLANE_FIT_SEED);
    let mut best: Option<(Plane, usize)> = None;
    for _ in 0..PLANE_FIT_ITERATIONS {
        let i = rng.gen_range(0..positions.len());
        let j = rng.gen_range(0..positions.len());
        let k = rng.gen_range(0..positions.len());
        if i == j || j == k || i == k {
            continue;
        }
        let Some(plane) = Plane::from_triple(&positions[i], &positions[j], &positions[k]) else {
            continue;
        };
        let support = positions
            .iter()
            .filter(|p| plane.distance(p) <= PLANE_INLIER_TOLERANCE_MM)
            .count();
        if best.as_ref().map_or(true, |(_, s)| support > *s) {
            best = Some((plane, support));
        }
    }

    let Some((plane, support)) = best else {
        return cloud.clone();
    };
    if support < min_points_in_plane {
        debug!(
            support,
            min_points_in_plane, "dominant plane under threshold, keeping cloud intact"
        );
        return cloud.clone();
    }

    debug!(support, "removing dominant plane");
    let mut out = PointCloud::with_capacity(cloud.len() - support);
    for point in cloud.iter() {
        if plane.distance(&point.position) > PLANE_INLIER_TOLERANCE_MM {
            out.set(*point);
        }
    }
    out
}
