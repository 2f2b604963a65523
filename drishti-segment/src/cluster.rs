//! Radius-based spatial clustering
//!
//! Connected components over the neighbor graph in which two points are
//! adjacent iff their Euclidean distance is at most the clustering radius.
//! Neighbor lookup runs on a voxel hash with cell edge equal to the radius,
//! so only the 27 surrounding cells are ever scanned.

use ahash::AHashMap;
use drishti_core::{Point, PointCloud};
use std::collections::VecDeque;

fn cell_of(p: &Point, radius: f64) -> (i64, i64, i64) {
    (
        (p.position.x / radius).floor() as i64,
        (p.position.y / radius).floor() as i64,
        (p.position.z / radius).floor() as i64,
    )
}

/// Group the cloud into clusters of mutually reachable points.
///
/// Clusters smaller than `min_points_in_segment` are discarded entirely.
/// Returned clusters are ordered by their first-discovered seed point in
/// the cloud's iteration order. `radius_mm` must be positive; callers
/// validate it upstream.
pub fn cluster(
    cloud: &PointCloud,
    radius_mm: f64,
    min_points_in_segment: usize,
) -> Vec<PointCloud> {
    let points: Vec<&Point> = cloud.iter().collect();
    let mut grid: AHashMap<(i64, i64, i64), Vec<usize>> = AHashMap::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        grid.entry(cell_of(p, radius_mm)).or_default().push(i);
    }

    let mut visited = vec![false; points.len()];
    let mut clusters = Vec::new();
    for seed in 0..points.len() {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        let mut members = vec![seed];
        let mut queue = VecDeque::from([seed]);
        while let Some(current) = queue.pop_front() {
            let (cx, cy, cz) = cell_of(points[current], radius_mm);
            for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        let Some(candidates) = grid.get(&(cx + dx, cy + dy, cz + dz)) else {
                            continue;
                        };
                        for &other in candidates {
                            if visited[other] {
                                continue;
                            }
                            let dist = points[current]
                                .position
                                .distance(&points[other].position);
                            if dist <= radius_mm {
                                visited[other] = true;
                                members.push(other);
                                queue.push_back(other);
                            }
                        }
                    }
                }
            }
        }
        if members.len() >= min_points_in_segment {
            clusters.push(members.iter().map(|&i| *points[i]).collect());
        }
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use drishti_core::Vec3;

    fn blob(origin: Vec3, n: usize) -> impl Iterator<Item = Point> {
        (0..n).map(move |i| Point::new(Vec3::new(origin.x + i as f64, origin.y, origin.z)))
    }

    #[test]
    fn test_two_separated_blobs() {
        let cloud: PointCloud = blob(Vec3::new(0.0, 0.0, 0.0), 4)
            .chain(blob(Vec3::new(100.0, 100.0, 100.0), 5))
            .collect();
        let clusters = cluster(&cloud, 5.0, 3);
        assert_eq!(clusters.len(), 2);
        // Ordered by first-discovered seed: the blob inserted first leads.
        assert_eq!(clusters[0].len(), 4);
        assert_eq!(clusters[1].len(), 5);
    }

    #[test]
    fn test_small_clusters_discarded() {
        let cloud: PointCloud = blob(Vec3::new(0.0, 0.0, 0.0), 2)
            .chain(blob(Vec3::new(100.0, 0.0, 0.0), 6))
            .collect();
        let clusters = cluster(&cloud, 5.0, 3);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 6);
    }

    #[test]
    fn test_chain_within_radius_is_one_cluster() {
        // Consecutive points 4mm apart; ends are far apart but connected
        // through the chain.
        let cloud: PointCloud = (0..10)
            .map(|i| Point::new(Vec3::new(i as f64 * 4.0, 0.0, 0.0)))
            .collect();
        let clusters = cluster(&cloud, 5.0, 1);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 10);
    }

    #[test]
    fn test_empty_cloud() {
        assert!(cluster(&PointCloud::new(), 5.0, 1).is_empty());
    }

    #[test]
    fn test_boundary_distance_is_adjacent() {
        let cloud: PointCloud = [
            Point::new(Vec3::new(0.0, 0.0, 0.0)),
            Point::new(Vec3::new(5.0, 0.0, 0.0)),
        ]
        .into_iter()
        .collect();
        assert_eq!(cluster(&cloud, 5.0, 1).len(), 1);
    }
}
