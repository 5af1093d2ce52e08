//! Compute layer for geometry and indexing.
//!
//! Kept independent of the directory tables: it works on plain points,
//! rectangles and building ids.

pub mod rtree;
pub mod spatial;
pub mod validation;

pub use rtree::BuildingIndex;
pub use spatial::{
    METERS_PER_DEGREE, ProximityQuery, approximate_box, geodesic_distance, radius_envelope,
};
