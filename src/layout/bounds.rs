//! Aggregate geometry over a set of nodes

use crate::nodes::Node;
use egui::{Pos2, Rect};

/// Smallest rectangle containing every node, grown by `padding`
pub fn nodes_bounds(nodes: &[Node], padding: f32) -> Option<Rect> {
    let mut iter = nodes.iter();
    let first = iter.next()?.get_rect();
    let bounds = iter.fold(first, |acc, node| acc.union(node.get_rect()));
    Some(bounds.expand(padding))
}

/// Mean of the node anchor points (top-left corners)
pub fn centroid(nodes: &[Node]) -> Option<Pos2> {
    if nodes.is_empty() {
        return None;
    }
    let sum = nodes
        .iter()
        .fold(egui::Vec2::ZERO, |acc, node| acc + node.position.to_vec2());
    Some((sum / nodes.len() as f32).to_pos2())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::NodeKind;

    #[test]
    fn test_empty_set_has_no_bounds() {
        assert!(nodes_bounds(&[], 100.0).is_none());
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn test_bounds_cover_all_nodes_with_padding() {
        let nodes = vec![
            Node::new(NodeKind::Trigger, "a", Pos2::new(0.0, 0.0)),
            Node::new(NodeKind::Output, "b", Pos2::new(440.0, 240.0)),
        ];
        let bounds = nodes_bounds(&nodes, 100.0).unwrap();
        assert_eq!(bounds.min, Pos2::new(-100.0, -100.0));
        assert_eq!(bounds.max, Pos2::new(740.0, 440.0));
    }

    #[test]
    fn test_centroid_is_mean_of_anchors() {
        let nodes = vec![
            Node::new(NodeKind::Trigger, "a", Pos2::new(0.0, 0.0)),
            Node::new(NodeKind::Output, "b", Pos2::new(400.0, 200.0)),
        ];
        assert_eq!(centroid(&nodes), Some(Pos2::new(200.0, 100.0)));
    }
}
