//! Spatial index over section endpoints.
//!
//! An R-tree (via `rstar`) maps every directed section's two endpoint
//! coordinates back to the section.  Used by the upgrade planner to find all
//! sections passing close to a busy one without scanning the whole network
//! per query.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use cg_core::{Point, SectionId};

use crate::network::RoadNetwork;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// One endpoint of one directed section.
#[derive(Clone, Debug)]
struct EndpointEntry {
    point:   [f64; 2],
    section: SectionId,
}

impl RTreeObject for EndpointEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for EndpointEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── SectionLocator ────────────────────────────────────────────────────────────

/// Read-only endpoint index built from a network snapshot.
///
/// Coordinates never change after loading, so the index stays valid across
/// danger overrides.
pub struct SectionLocator {
    tree: RTree<EndpointEntry>,
}

impl SectionLocator {
    /// Bulk-load the index: O(S log S) for S directed sections.
    pub fn build(network: &RoadNetwork) -> Self {
        let mut entries = Vec::with_capacity(network.section_count() * 2);
        for (section, start, end) in network.sections() {
            for id in [start, end] {
                if let Some(node) = network.node(id) {
                    entries.push(EndpointEntry { point: node.pos.to_array(), section });
                }
            }
        }
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Sections with an endpoint strictly closer than `radius` to `centre`.
    ///
    /// A section with both endpoints in range is yielded twice.
    pub fn sections_within(&self, centre: Point, radius: f64) -> impl Iterator<Item = SectionId> + '_ {
        let query = centre.to_array();
        self.tree
            .locate_within_distance(query, radius * radius)
            .filter(move |e| Point::new(e.point[0], e.point[1]).distance(centre) < radius)
            .map(|e| e.section)
    }
}
