//! Node interaction handling (selection, palette drops, duplication, deletion)

use crate::context::Locale;
use crate::i18n;
use crate::layout::{Placement, PlacementConfig};
use crate::nodes::{FlowGraph, GraphError, Node, NodeId, NodeKind};
use egui::Pos2;

/// Payload carried from a palette entry to the canvas drop target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub node_type: String,
}

impl DragPayload {
    pub fn for_kind(kind: NodeKind) -> Self {
        Self {
            node_type: kind.key().to_string(),
        }
    }
}

/// Manages node selections and the delete confirmation step
#[derive(Debug, Clone, Default)]
pub struct InteractionManager {
    pending_delete: Option<NodeId>,
}

impl InteractionManager {
    /// Creates a new interaction manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a node, optionally keeping existing selection
    pub fn click_node(&mut self, graph: &mut FlowGraph, node_id: NodeId, multi_select: bool) {
        if multi_select {
            graph.toggle_selected(node_id);
        } else if !graph.node(node_id).is_some_and(|node| node.flags.selected) {
            graph.select_only(node_id);
        }
    }

    /// Click on empty canvas
    pub fn click_empty(&mut self, graph: &mut FlowGraph) {
        graph.clear_selection();
    }

    /// Creates a node from a palette drop at a canvas position
    pub fn drop_payload(
        &mut self,
        graph: &mut FlowGraph,
        payload: &DragPayload,
        canvas_pos: Pos2,
        config: &PlacementConfig,
        locale: Locale,
    ) -> Result<(NodeId, Placement), String> {
        let kind: NodeKind = payload.node_type.parse()?;
        // Drop point is the node center, not its corner
        let preferred = canvas_pos - config.node_size * 0.5;
        let (id, placement) = graph.place_node(kind, i18n::kind_label(kind, locale), preferred, config);
        graph.select_only(id);
        log::info!("Dropped {} node {}", kind, id);
        Ok((id, placement))
    }

    /// Duplicates every selected node and selects the copies
    pub fn duplicate_selected(&mut self, graph: &mut FlowGraph, config: &PlacementConfig) -> Vec<NodeId> {
        let mut copies = Vec::new();
        for id in graph.selected_ids() {
            match graph.duplicate_node(id, config) {
                Ok((copy, _)) => copies.push(copy),
                Err(err) => log::warn!("Duplicate failed: {}", err),
            }
        }
        if !copies.is_empty() {
            graph.clear_selection();
            for id in &copies {
                graph.toggle_selected(*id);
            }
        }
        copies
    }

    /// Asks for confirmation before deleting `node_id`.
    ///
    /// Locked or unknown nodes are refused.
    pub fn request_delete(&mut self, graph: &FlowGraph, node_id: NodeId) -> Result<(), GraphError> {
        let node = graph.node(node_id).ok_or(GraphError::NodeNotFound(node_id))?;
        if node.flags.locked {
            return Err(GraphError::Locked(node_id));
        }
        self.pending_delete = Some(node_id);
        Ok(())
    }

    /// Node awaiting confirmation, if any
    pub fn pending_delete(&self) -> Option<NodeId> {
        self.pending_delete
    }

    /// Deletes the node awaiting confirmation
    pub fn confirm_delete(&mut self, graph: &mut FlowGraph) -> Option<Node> {
        let node_id = self.pending_delete.take()?;
        match graph.remove_node(node_id) {
            Ok(node) => {
                log::info!("Deleted node {}", node_id);
                Some(node)
            }
            Err(err) => {
                log::warn!("Delete failed: {}", err);
                None
            }
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PlacementStrategy;

    #[test]
    fn test_drop_creates_selected_node_centered_on_pointer() {
        let mut graph = FlowGraph::new();
        let mut interaction = InteractionManager::new();
        let config = PlacementConfig::default();

        let (id, placement) = interaction
            .drop_payload(
                &mut graph,
                &DragPayload::for_kind(NodeKind::Trigger),
                Pos2::new(100.0, 50.0),
                &config,
                Locale::English,
            )
            .unwrap();
        assert_eq!(placement.strategy, PlacementStrategy::Preferred);
        let node = graph.node(id).unwrap();
        assert_eq!(node.position, Pos2::ZERO);
        assert_eq!(node.kind, NodeKind::Trigger);
        assert!(node.flags.selected);
    }

    #[test]
    fn test_drop_rejects_unknown_type() {
        let mut graph = FlowGraph::new();
        let payload = DragPayload {
            node_type: "banner".to_string(),
        };
        let result = InteractionManager::new().drop_payload(
            &mut graph,
            &payload,
            Pos2::ZERO,
            &PlacementConfig::default(),
            Locale::English,
        );
        assert!(result.is_err());
        assert!(graph.is_empty());
    }

    #[test]
    fn test_click_selection() {
        let mut graph = FlowGraph::new();
        let a = graph.add_node(Node::new(NodeKind::Action, "a", Pos2::ZERO));
        let b = graph.add_node(Node::new(NodeKind::Action, "b", Pos2::new(300.0, 0.0)));
        let mut interaction = InteractionManager::new();

        interaction.click_node(&mut graph, a, false);
        interaction.click_node(&mut graph, b, true);
        assert_eq!(graph.selected_ids(), vec![a, b]);
        // clicking an already-selected node keeps the group for dragging
        interaction.click_node(&mut graph, a, false);
        assert_eq!(graph.selected_ids(), vec![a, b]);
        interaction.click_empty(&mut graph);
        assert!(graph.selected_ids().is_empty());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut graph = FlowGraph::new();
        let id = graph.add_node(Node::new(NodeKind::Data, "rows", Pos2::ZERO));
        let mut interaction = InteractionManager::new();

        interaction.request_delete(&graph, id).unwrap();
        assert_eq!(graph.len(), 1);
        interaction.cancel_delete();
        assert!(interaction.confirm_delete(&mut graph).is_none());
        assert_eq!(graph.len(), 1);

        interaction.request_delete(&graph, id).unwrap();
        let deleted = interaction.confirm_delete(&mut graph).unwrap();
        assert_eq!(deleted.id, id);
        assert!(graph.is_empty());
        assert_eq!(interaction.pending_delete(), None);
    }

    #[test]
    fn test_locked_node_delete_is_refused() {
        let mut graph = FlowGraph::new();
        let id = graph.add_node(Node::new(NodeKind::Data, "rows", Pos2::ZERO));
        graph.node_mut(id).unwrap().flags.locked = true;
        let mut interaction = InteractionManager::new();
        assert_eq!(interaction.request_delete(&graph, id), Err(GraphError::Locked(id)));
        assert_eq!(interaction.pending_delete(), None);
    }

    #[test]
    fn test_duplicate_selected_selects_copies() {
        let mut graph = FlowGraph::new();
        let id = graph.add_node(Node::new(NodeKind::Schedule, "cron", Pos2::ZERO));
        graph.select_only(id);
        let copies = InteractionManager::new().duplicate_selected(&mut graph, &PlacementConfig::default());
        assert_eq!(copies.len(), 1);
        assert_eq!(graph.selected_ids(), copies);
        assert_eq!(graph.node(copies[0]).unwrap().position, Pos2::new(220.0, 0.0));
    }
}
