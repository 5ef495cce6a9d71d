//! Axis-aligned overlap tests between node boxes

use crate::nodes::{Node, NodeId};
use egui::{Pos2, Rect, Vec2};

/// Separating-axis test for two axis-aligned rectangles.
///
/// The boxes are apart only when one lies strictly to the left, right, above,
/// or below the other; shared edges count as overlapping.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    !(a.max.x < b.min.x || a.min.x > b.max.x || a.max.y < b.min.y || a.min.y > b.max.y)
}

/// Box a node of `size` would occupy at `position`, grown by `padding` on every side
pub fn candidate_box(position: Pos2, size: Vec2, padding: f32) -> Rect {
    Rect::from_min_size(position, size).expand(padding)
}

/// Returns the first node (other than `exclude`) whose box the candidate overlaps
pub fn first_collision<'a>(
    nodes: &'a [Node],
    candidate: Rect,
    exclude: Option<NodeId>,
) -> Option<&'a Node> {
    nodes
        .iter()
        .filter(|node| Some(node.id) != exclude)
        .find(|node| overlaps(candidate, node.get_rect()))
}

/// Whether a candidate box is clear of every node except `exclude`
pub fn is_free(nodes: &[Node], candidate: Rect, exclude: Option<NodeId>) -> bool {
    first_collision(nodes, candidate, exclude).is_none()
}
