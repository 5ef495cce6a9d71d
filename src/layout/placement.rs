//! Nearest-free-slot search for new and moved nodes

use super::collision::{candidate_box, is_free};
use super::grid::GridSnap;
use crate::constants::layout;
use crate::nodes::{Node, NodeId};
use egui::{Pos2, Vec2};

/// Inputs for the placement search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementConfig {
    pub grid: GridSnap,
    /// Footprint tested for collisions
    pub node_size: Vec2,
    pub padding: f32,
    /// Cells probed in each direction before falling back
    pub max_probes: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            grid: GridSnap::default(),
            node_size: Vec2::new(layout::NODE_WIDTH, layout::NODE_HEIGHT),
            padding: layout::COLLISION_PADDING,
            max_probes: layout::MAX_PROBES,
        }
    }
}

/// How a placement was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStrategy {
    /// The snapped preferred position was free
    Preferred,
    /// Free slot found this many cells to the right
    ShiftedRight(u32),
    /// Free slot found this many cells below
    ShiftedDown(u32),
    /// Every probe collided; position derived from the node count, not checked
    Fallback,
}

/// Result of [`find_available_position`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Pos2,
    pub strategy: PlacementStrategy,
}

impl Placement {
    /// True when the node ends up somewhere other than the snapped preferred spot
    pub fn moved(&self) -> bool {
        self.strategy != PlacementStrategy::Preferred
    }

    /// True when the position went through a collision check
    pub fn is_checked(&self) -> bool {
        self.strategy != PlacementStrategy::Fallback
    }
}

/// Finds where a node should land when dropped at `preferred`.
///
/// Snaps to the grid, then probes whole cells to the right on the same row,
/// then downward in the same column. When nothing within `max_probes` cells is
/// free the position is derived from the node count and may overlap.
pub fn find_available_position(
    nodes: &[Node],
    preferred: Pos2,
    exclude: Option<NodeId>,
    config: &PlacementConfig,
) -> Placement {
    let start = config.grid.snap_pos(preferred);
    let free_at = |pos: Pos2| is_free(nodes, candidate_box(pos, config.node_size, config.padding), exclude);

    if free_at(start) {
        return Placement {
            position: start,
            strategy: PlacementStrategy::Preferred,
        };
    }

    for step in 1..=config.max_probes {
        let pos = Pos2::new(start.x + step as f32 * config.grid.cell.x, start.y);
        if free_at(pos) {
            return Placement {
                position: pos,
                strategy: PlacementStrategy::ShiftedRight(step),
            };
        }
    }

    for step in 1..=config.max_probes {
        let pos = Pos2::new(start.x, start.y + step as f32 * config.grid.cell.y);
        if free_at(pos) {
            return Placement {
                position: pos,
                strategy: PlacementStrategy::ShiftedDown(step),
            };
        }
    }

    let count = nodes.iter().filter(|node| Some(node.id) != exclude).count();
    let position = fallback_position(count, config);
    log::warn!(
        "No free slot within {} cells of ({:.0}, {:.0}); falling back to ({:.0}, {:.0})",
        config.max_probes,
        start.x,
        start.y,
        position.x,
        position.y
    );
    Placement {
        position,
        strategy: PlacementStrategy::Fallback,
    }
}

/// Row-major slot for the `count`-th node
fn fallback_position(count: usize, config: &PlacementConfig) -> Pos2 {
    let column = count % layout::FALLBACK_COLUMNS;
    let row = count / layout::FALLBACK_COLUMNS;
    Pos2::new(
        column as f32 * config.grid.cell.x,
        row as f32 * config.grid.cell.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::collision::first_collision;
    use crate::nodes::NodeKind;

    fn node_at(x: f32, y: f32) -> Node {
        Node::new(NodeKind::Action, "n", Pos2::new(x, y))
    }

    #[test]
    fn test_first_node_lands_where_dropped() {
        let placement = find_available_position(&[], Pos2::new(230.0, 110.0), None, &PlacementConfig::default());
        assert_eq!(placement.position, Pos2::new(220.0, 120.0));
        assert_eq!(placement.strategy, PlacementStrategy::Preferred);
        assert!(!placement.moved());
    }

    #[test]
    fn test_occupied_origin_moves_one_cell_right() {
        let nodes = vec![node_at(0.0, 0.0)];
        let placement = find_available_position(&nodes, Pos2::ZERO, None, &PlacementConfig::default());
        assert_eq!(placement.position, Pos2::new(220.0, 0.0));
        assert_eq!(placement.strategy, PlacementStrategy::ShiftedRight(1));
        assert!(placement.moved());
    }

    #[test]
    fn test_full_row_moves_down() {
        let config = PlacementConfig::default();
        let nodes: Vec<Node> = (0..=config.max_probes)
            .map(|i| node_at(i as f32 * 220.0, 0.0))
            .collect();
        let placement = find_available_position(&nodes, Pos2::ZERO, None, &config);
        assert_eq!(placement.position, Pos2::new(0.0, 120.0));
        assert_eq!(placement.strategy, PlacementStrategy::ShiftedDown(1));
    }

    #[test]
    fn test_row_and_column_full_falls_back_to_node_count() {
        let config = PlacementConfig {
            max_probes: 2,
            ..PlacementConfig::default()
        };
        let mut nodes = Vec::new();
        for i in 0..=2 {
            nodes.push(node_at(i as f32 * 220.0, 0.0));
        }
        for i in 1..=2 {
            nodes.push(node_at(0.0, i as f32 * 120.0));
        }
        let placement = find_available_position(&nodes, Pos2::ZERO, None, &config);
        assert_eq!(placement.strategy, PlacementStrategy::Fallback);
        assert!(!placement.is_checked());
        // five nodes: first slot of the second fallback row
        assert_eq!(placement.position, Pos2::new(0.0, 120.0));
    }

    #[test]
    fn test_moving_node_does_not_collide_with_itself() {
        let nodes = vec![node_at(0.0, 0.0), node_at(440.0, 0.0)];
        let id = nodes[0].id;
        let placement = find_available_position(&nodes, Pos2::new(10.0, 5.0), Some(id), &PlacementConfig::default());
        assert_eq!(placement.position, Pos2::ZERO);
        assert_eq!(placement.strategy, PlacementStrategy::Preferred);
    }

    #[test]
    fn test_probed_positions_never_collide() {
        let config = PlacementConfig::default();
        let mut nodes = Vec::new();
        for i in 0..40 {
            let preferred = Pos2::new((i % 3) as f32 * 150.0, (i % 4) as f32 * 90.0);
            let placement = find_available_position(&nodes, preferred, None, &config);
            if placement.is_checked() {
                let candidate = candidate_box(placement.position, config.node_size, config.padding);
                assert!(first_collision(&nodes, candidate, None).is_none());
            }
            nodes.push(node_at(placement.position.x, placement.position.y));
        }
    }

    #[test]
    fn test_search_is_deterministic() {
        let nodes = vec![node_at(0.0, 0.0), node_at(220.0, 0.0), node_at(0.0, 120.0)];
        let config = PlacementConfig::default();
        let a = find_available_position(&nodes, Pos2::new(5.0, 5.0), None, &config);
        let b = find_available_position(&nodes, Pos2::new(5.0, 5.0), None, &config);
        assert_eq!(a, b);
        assert_eq!(a.position, Pos2::new(440.0, 0.0));
    }
}
