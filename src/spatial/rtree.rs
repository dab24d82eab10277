//! R-tree index over node collision footprints, using the rstar crate.
//!
//! Two consumers:
//! - The collision force queries footprint overlaps per node instead of
//!   scanning all pairs.
//! - The facade's hit testing (`nearest node within radius`) for pointer
//!   dragging.
//!
//! The index is rebuilt by bulk load whenever positions have moved;
//! incremental updates are not worth it for per-tick rebuilds.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

/// One node's circular footprint in the index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleEntry {
    /// Node buffer index.
    pub index: usize,
    /// Center X.
    pub x: f32,
    /// Center Y.
    pub y: f32,
    /// Footprint radius (collision radius plus any padding).
    pub radius: f32,
}

impl CircleEntry {
    /// Create a new entry.
    pub fn new(index: usize, x: f32, y: f32, radius: f32) -> Self {
        Self { index, x, y, radius }
    }
}

impl RTreeObject for CircleEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.x - self.radius, self.y - self.radius],
            [self.x + self.radius, self.y + self.radius],
        )
    }
}

impl PointDistance for CircleEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over node footprints.
pub struct CircleIndex {
    tree: RTree<CircleEntry>,
}

impl CircleIndex {
    /// Bulk-load an index from entries.
    pub fn bulk(entries: Vec<CircleEntry>) -> Self {
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Entries whose footprint circle overlaps the given circle.
    ///
    /// Envelope intersection first, exact circle check second.
    pub fn overlapping(&self, x: f32, y: f32, radius: f32) -> impl Iterator<Item = &CircleEntry> {
        let envelope = AABB::from_corners([x - radius, y - radius], [x + radius, y + radius]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(move |entry| {
                let dx = entry.x - x;
                let dy = entry.y - y;
                let reach = entry.radius + radius;
                dx * dx + dy * dy < reach * reach
            })
    }

    /// The entry whose center is nearest to a point, within a maximum
    /// distance. Used for hit testing.
    pub fn nearest_within(&self, x: f32, y: f32, max_distance: f32) -> Option<usize> {
        self.tree
            .nearest_neighbor(&[x, y])
            .filter(|entry| entry.distance_2(&[x, y]) <= max_distance * max_distance)
            .map(|entry| entry.index)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(entries: &[(f32, f32, f32)]) -> CircleIndex {
        CircleIndex::bulk(
            entries
                .iter()
                .enumerate()
                .map(|(i, &(x, y, r))| CircleEntry::new(i, x, y, r))
                .collect(),
        )
    }

    #[test]
    fn test_overlapping_finds_touching_circles() {
        // 0 and 1 overlap; 2 is far away.
        let idx = index(&[(0.0, 0.0, 5.0), (8.0, 0.0, 5.0), (100.0, 0.0, 5.0)]);

        let hits: Vec<usize> = idx.overlapping(0.0, 0.0, 5.0).map(|e| e.index).collect();
        assert!(hits.contains(&0));
        assert!(hits.contains(&1));
        assert!(!hits.contains(&2));
    }

    #[test]
    fn test_overlapping_excludes_envelope_only_neighbors() {
        // Envelopes of two diagonal circles intersect but the circles do not.
        let idx = index(&[(0.0, 0.0, 5.0), (7.5, 7.5, 5.0)]);
        let hits: Vec<usize> = idx.overlapping(0.0, 0.0, 5.0).map(|e| e.index).collect();
        assert_eq!(hits, vec![0]);
    }

    #[test]
    fn test_nearest_within() {
        let idx = index(&[(0.0, 0.0, 5.0), (50.0, 0.0, 5.0)]);

        assert_eq!(idx.nearest_within(2.0, 0.0, 10.0), Some(0));
        assert_eq!(idx.nearest_within(48.0, 0.0, 10.0), Some(1));
        assert_eq!(idx.nearest_within(25.0, 0.0, 5.0), None);
    }

    #[test]
    fn test_empty_index() {
        let idx = CircleIndex::bulk(Vec::new());
        assert!(idx.is_empty());
        assert_eq!(idx.nearest_within(0.0, 0.0, 10.0), None);
        assert_eq!(idx.overlapping(0.0, 0.0, 10.0).count(), 0);
    }

    #[test]
    fn test_len() {
        let idx = index(&[(0.0, 0.0, 1.0), (1.0, 1.0, 1.0), (2.0, 2.0, 1.0)]);
        assert_eq!(idx.len(), 3);
    }
}
