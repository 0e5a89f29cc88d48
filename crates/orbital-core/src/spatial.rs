use rstar::{RTree, RTreeObject, AABB};

use crate::entity::Orb;
use crate::geometry::BBox;

/// An entry in the R-tree, referencing an orb by its index in the batch.
#[derive(Debug, Clone)]
pub struct OrbEntry {
    pub orb_index: usize,
    pub bbox: BBox,
}

impl RTreeObject for OrbEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bbox.min.x, self.bbox.min.y],
            [self.bbox.max.x, self.bbox.max.y],
        )
    }
}

/// Spatial index over one frame's orbs, for culling before drawing.
pub struct OrbIndex {
    tree: RTree<OrbEntry>,
}

impl OrbIndex {
    /// Bulk-load the bounding circles of `orbs`. Indices refer back into the slice.
    pub fn build(orbs: &[Orb]) -> Self {
        let entries = orbs
            .iter()
            .enumerate()
            .map(|(orb_index, orb)| OrbEntry {
                orb_index,
                bbox: orb.bbox(),
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Indices of orbs whose bounding box touches `bounds`, in ascending order.
    pub fn query_bounds(&self, bounds: &BBox) -> Vec<usize> {
        let envelope = AABB::from_corners(
            [bounds.min.x, bounds.min.y],
            [bounds.max.x, bounds.max.y],
        );
        let mut hits: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.orb_index)
            .collect();
        hits.sort_unstable();
        hits
    }

    /// Copy out the orbs that survive culling, keeping batch order.
    pub fn cull(&self, orbs: &[Orb], bounds: &BBox) -> Vec<Orb> {
        self.query_bounds(bounds)
            .into_iter()
            .filter_map(|i| orbs.get(i).copied())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::OrbKind;
    use crate::geometry::Point;

    #[test]
    fn test_query_bounds() {
        let orbs = vec![
            Orb::new(OrbKind::Player, Point::new(0.0, 0.0), 5.0),
            Orb::star(Point::new(100.0, 100.0), 5.0),
            Orb::star(Point::new(-20.0, 8.0), 3.0),
        ];
        let index = OrbIndex::build(&orbs);
        assert_eq!(index.len(), 3);

        let view = BBox::new(Point::new(-10.0, -10.0), Point::new(10.0, 10.0));
        assert_eq!(index.query_bounds(&view), vec![0]);

        // Orb 2's right edge (-20 + 3) sits exactly on the view's left edge.
        let wide = BBox::new(Point::new(-17.0, -10.0), Point::new(10.0, 10.0));
        assert_eq!(index.query_bounds(&wide), vec![0, 2]);
    }

    #[test]
    fn test_cull_preserves_order() {
        let orbs = vec![
            Orb::star(Point::new(5.0, 5.0), 1.0),
            Orb::star(Point::new(500.0, 5.0), 1.0),
            Orb::star(Point::new(1.0, 1.0), 1.0),
        ];
        let index = OrbIndex::build(&orbs);
        let view = BBox::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let visible = index.cull(&orbs, &view);
        assert_eq!(visible, vec![orbs[0], orbs[2]]);
    }

    #[test]
    fn test_empty_index() {
        let index = OrbIndex::build(&[]);
        assert!(index.is_empty());
        let view = BBox::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert!(index.query_bounds(&view).is_empty());
    }
}
