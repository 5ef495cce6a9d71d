//! Node graph data structures and operations

use super::node::{Node, NodeId, NodeKind, NodeStatus};
use crate::layout::{find_available_position, Placement, PlacementConfig};
use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors from editing the graph
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node {0} does not exist")]
    NodeNotFound(NodeId),

    #[error("Cannot connect a node to itself")]
    SelfConnection,

    #[error("Node {from} is already connected to {to}")]
    DuplicateConnection { from: NodeId, to: NodeId },

    #[error("Node {0} is locked")]
    Locked(NodeId),
}

/// Unique identifier for a connection
pub type ConnectionId = Uuid;

/// Represents a connection between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub from_node: NodeId,
    pub to_node: NodeId,
    #[serde(with = "super::serde_egui::color32")]
    pub color: Color32,
    #[serde(default)]
    pub animated: bool,
}

impl Connection {
    /// Creates a new connection with the default color
    pub fn new(from_node: NodeId, to_node: NodeId) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_node,
            to_node,
            color: Color32::from_rgb(148, 163, 184),
            animated: false,
        }
    }

    /// Whether either end is `node_id`
    pub fn touches(&self, node_id: NodeId) -> bool {
        self.from_node == node_id || self.to_node == node_id
    }
}

/// The nodes and connections on a canvas, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

impl FlowGraph {
    /// Creates a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    fn require_mut(&mut self, id: NodeId) -> Result<&mut Node, GraphError> {
        self.node_mut(id).ok_or(GraphError::NodeNotFound(id))
    }

    /// Adds a node exactly where it is, without a placement search
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.push(node);
        id
    }

    /// Creates a node of `kind` at the nearest free slot to `preferred`
    pub fn place_node(
        &mut self,
        kind: NodeKind,
        label: impl Into<String>,
        preferred: Pos2,
        config: &PlacementConfig,
    ) -> (NodeId, Placement) {
        let placement = find_available_position(&self.nodes, preferred, None, config);
        let mut node = Node::new(kind, label, placement.position);
        node.flags.auto_moved = placement.moved();
        log::debug!(
            "Placed {} node {} at ({:.0}, {:.0}) via {:?}",
            kind,
            node.id,
            placement.position.x,
            placement.position.y,
            placement.strategy
        );
        (self.add_node(node), placement)
    }

    /// Copies a node into the nearest free slot one cell to its right
    pub fn duplicate_node(
        &mut self,
        id: NodeId,
        config: &PlacementConfig,
    ) -> Result<(NodeId, Placement), GraphError> {
        let source = self.node(id).ok_or(GraphError::NodeNotFound(id))?;
        let mut copy = source.duplicate();
        let preferred = Pos2::new(source.position.x + config.grid.cell.x, source.position.y);
        let placement = find_available_position(&self.nodes, preferred, None, config);
        copy.position = placement.position;
        copy.flags.auto_moved = placement.moved();
        Ok((self.add_node(copy), placement))
    }

    /// Moves a node freely, as during a drag
    pub fn move_node(&mut self, id: NodeId, position: Pos2) -> Result<(), GraphError> {
        let node = self.require_mut(id)?;
        if node.flags.locked {
            return Err(GraphError::Locked(id));
        }
        node.position = position;
        Ok(())
    }

    /// Snaps a node that finished dragging into the nearest free slot
    pub fn settle_node(&mut self, id: NodeId, config: &PlacementConfig) -> Result<Placement, GraphError> {
        let dropped_at = self.node(id).ok_or(GraphError::NodeNotFound(id))?.position;
        let placement = find_available_position(&self.nodes, dropped_at, Some(id), config);
        let node = self.require_mut(id)?;
        node.position = placement.position;
        node.flags.auto_moved = placement.moved();
        Ok(placement)
    }

    /// Removes a node and all its connections
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node, GraphError> {
        let index = self
            .nodes
            .iter()
            .position(|node| node.id == id)
            .ok_or(GraphError::NodeNotFound(id))?;
        if self.nodes[index].flags.locked {
            return Err(GraphError::Locked(id));
        }
        self.connections.retain(|conn| !conn.touches(id));
        Ok(self.nodes.remove(index))
    }

    /// Adds a connection between two existing nodes
    pub fn add_connection(&mut self, from: NodeId, to: NodeId) -> Result<ConnectionId, GraphError> {
        if from == to {
            return Err(GraphError::SelfConnection);
        }
        for id in [from, to] {
            if self.node(id).is_none() {
                return Err(GraphError::NodeNotFound(id));
            }
        }
        if self
            .connections
            .iter()
            .any(|conn| conn.from_node == from && conn.to_node == to)
        {
            return Err(GraphError::DuplicateConnection { from, to });
        }

        let connection = Connection::new(from, to);
        let id = connection.id;
        self.connections.push(connection);
        Ok(id)
    }

    /// Removes a connection by id
    pub fn remove_connection(&mut self, id: ConnectionId) -> Option<Connection> {
        let index = self.connections.iter().position(|conn| conn.id == id)?;
        Some(self.connections.remove(index))
    }

    /// Connections with either end at `node_id`
    pub fn connections_for(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |conn| conn.touches(node_id))
    }

    pub fn set_status(&mut self, id: NodeId, status: NodeStatus) -> Result<(), GraphError> {
        let node = self.require_mut(id)?;
        if node.flags.locked {
            return Err(GraphError::Locked(id));
        }
        node.status = status;
        node.flags.executing = status == NodeStatus::Running;
        Ok(())
    }

    /// Marks only `id` as selected
    pub fn select_only(&mut self, id: NodeId) {
        for node in &mut self.nodes {
            node.flags.selected = node.id == id;
        }
    }

    /// Flips selection on one node, leaving the rest alone
    pub fn toggle_selected(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.flags.selected = !node.flags.selected;
        }
    }

    pub fn clear_selection(&mut self) {
        for node in &mut self.nodes {
            node.flags.selected = false;
        }
    }

    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|node| node.flags.selected)
            .map(|node| node.id)
            .collect()
    }

    /// Topmost visible node under a canvas-space point
    pub fn node_at(&self, pos: Pos2) -> Option<NodeId> {
        self.nodes
            .iter()
            .rev()
            .filter(|node| node.flags.visible)
            .find(|node| node.get_rect().contains(pos))
            .map(|node| node.id)
    }
}
