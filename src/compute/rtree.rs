//! R*-tree over building locations.
//!
//! Both proximity modes go through the tree:
//!
//! 1. **Envelope pruning**: `locate_in_envelope` returns only buildings whose
//!    location lies inside a degree rectangle.
//! 2. **Exact filtering**: radius queries then keep candidates whose geodesic
//!    distance is within the radius. Box queries use the rectangle as-is.

use crate::compute::spatial::{geodesic_distance, radius_envelope};
use geo::{Point, Rect};
use orgdir_types::ids::BuildingId;
use rstar::primitives::GeomWithData;
use rstar::{AABB, RTree};

/// Indexed entry: `[longitude, latitude]` tagged with the building id.
pub type IndexedBuilding = GeomWithData<[f64; 2], BuildingId>;

/// Spatial index of building locations.
#[derive(Default)]
pub struct BuildingIndex {
    tree: RTree<IndexedBuilding>,
}

impl std::fmt::Debug for BuildingIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildingIndex")
            .field("size", &self.tree.size())
            .finish()
    }
}

impl BuildingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index in one pass (used when loading a snapshot).
    pub fn bulk_load<I>(buildings: I) -> Self
    where
        I: IntoIterator<Item = (BuildingId, Point)>,
    {
        let entries = buildings
            .into_iter()
            .map(|(id, point)| GeomWithData::new([point.x(), point.y()], id))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    pub fn insert(&mut self, id: BuildingId, location: &Point) {
        self.tree
            .insert(GeomWithData::new([location.x(), location.y()], id));
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Buildings within `radius_meters` geodesic distance of `center`.
    ///
    /// # Returns
    ///
    /// `(id, distance)` pairs sorted by distance, then id.
    pub fn within_radius(&self, center: &Point, radius_meters: f64) -> Vec<(BuildingId, f64)> {
        if !radius_meters.is_finite() || radius_meters < 0.0 {
            log::warn!("Rejecting radius query with radius {}", radius_meters);
            return Vec::new();
        }

        let envelope = to_aabb(&radius_envelope(center, radius_meters));

        let mut results: Vec<(BuildingId, f64)> = self
            .tree
            .locate_in_envelope(&envelope)
            .filter_map(|entry| {
                let [x, y] = *entry.geom();
                let distance = geodesic_distance(center, &Point::new(x, y));
                (distance <= radius_meters).then_some((entry.data, distance))
            })
            .collect();

        results.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        results
    }

    /// Buildings whose location lies inside `rect`, bounds inclusive.
    ///
    /// Returns ids in ascending order.
    pub fn within_rect(&self, rect: &Rect) -> Vec<BuildingId> {
        let (min, max) = (rect.min(), rect.max());
        if ![min.x, min.y, max.x, max.y].iter().all(|v| v.is_finite()) {
            log::warn!("Rejecting bounding box query with non-finite coordinates");
            return Vec::new();
        }

        let mut ids: Vec<BuildingId> = self
            .tree
            .locate_in_envelope(&to_aabb(rect))
            .map(|entry| entry.data)
            .collect();
        ids.sort_unstable();
        ids
    }
}

fn to_aabb(rect: &Rect) -> AABB<[f64; 2]> {
    AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y])
}
