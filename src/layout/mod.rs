//! Canvas layout arithmetic: grid snapping, collision tests, and placement search

pub mod bounds;
pub mod collision;
pub mod grid;
pub mod placement;

pub use bounds::{centroid, nodes_bounds};
pub use collision::{candidate_box, first_collision, is_free, overlaps};
pub use grid::{snap, GridSnap};
pub use placement::{find_available_position, Placement, PlacementConfig, PlacementStrategy};
