//! Node types and core node functionality

use crate::constants::layout;
use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a node
pub type NodeId = Uuid;

/// What a node stands for in the workflow. Only picks the icon, label, and accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Trigger,
    Action,
    Condition,
    Data,
    Schedule,
    Integration,
    Output,
}

impl NodeKind {
    /// Every kind, in palette order
    pub const ALL: [NodeKind; 7] = [
        NodeKind::Trigger,
        NodeKind::Action,
        NodeKind::Condition,
        NodeKind::Data,
        NodeKind::Schedule,
        NodeKind::Integration,
        NodeKind::Output,
    ];

    /// Drag-and-drop key for this kind
    pub fn key(&self) -> &'static str {
        match self {
            NodeKind::Trigger => "trigger",
            NodeKind::Action => "action",
            NodeKind::Condition => "condition",
            NodeKind::Data => "data",
            NodeKind::Schedule => "schedule",
            NodeKind::Integration => "integration",
            NodeKind::Output => "output",
        }
    }

    /// Single glyph shown in the node header
    pub fn icon(&self) -> &'static str {
        match self {
            NodeKind::Trigger => "⚡",
            NodeKind::Action => "▶",
            NodeKind::Condition => "◆",
            NodeKind::Data => "▤",
            NodeKind::Schedule => "⏰",
            NodeKind::Integration => "🔗",
            NodeKind::Output => "⏏",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown node type '{}'", s))
    }
}

/// Display status. Nothing executes, so this is set by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    #[default]
    Idle,
    Running,
    Success,
    Error,
    Warning,
}

impl NodeStatus {
    pub const ALL: [NodeStatus; 5] = [
        NodeStatus::Idle,
        NodeStatus::Running,
        NodeStatus::Success,
        NodeStatus::Error,
        NodeStatus::Warning,
    ];
}

/// Transient UI flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeFlags {
    pub selected: bool,
    pub expanded: bool,
    pub locked: bool,
    pub visible: bool,
    pub executing: bool,
    /// Set when placement moved the node away from where it was dropped
    pub auto_moved: bool,
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self {
            selected: false,
            expanded: false,
            locked: false,
            visible: true,
            executing: false,
            auto_moved: false,
        }
    }
}

/// A node placed on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    #[serde(with = "super::serde_egui::pos2")]
    pub position: Pos2,
    #[serde(with = "super::serde_egui::vec2")]
    pub size: Vec2,
    #[serde(default)]
    pub flags: NodeFlags,
    #[serde(default)]
    pub status: NodeStatus,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl Node {
    /// Creates a new node with a fresh id and the default footprint
    pub fn new(kind: NodeKind, label: impl Into<String>, position: Pos2) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            size: Vec2::new(layout::NODE_WIDTH, layout::NODE_HEIGHT),
            flags: NodeFlags::default(),
            status: NodeStatus::Idle,
            label: label.into(),
            description: String::new(),
            properties: serde_json::Map::new(),
        }
    }

    /// Sets the size of the node
    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    /// Sets the description of the node
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the bounding rectangle of the node
    pub fn get_rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    /// Center of the node's bounding box
    pub fn center(&self) -> Pos2 {
        self.position + self.size * 0.5
    }

    /// Copy of this node under a new id, with transient flags cleared
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.id = Uuid::new_v4();
        copy.label = format!("{} (copy)", self.label);
        copy.flags = NodeFlags {
            expanded: self.flags.expanded,
            ..NodeFlags::default()
        };
        copy.status = NodeStatus::Idle;
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_round_trips_through_drag_key() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.key().parse::<NodeKind>(), Ok(kind));
        }
        assert_eq!(" Trigger ".parse::<NodeKind>(), Ok(NodeKind::Trigger));
        assert!("sticker".parse::<NodeKind>().is_err());
    }

    #[test]
    fn test_node_rect_uses_default_footprint() {
        let node = Node::new(NodeKind::Action, "Send email", Pos2::new(220.0, 120.0));
        let rect = node.get_rect();
        assert_eq!(rect.min, Pos2::new(220.0, 120.0));
        assert_eq!(rect.max, Pos2::new(420.0, 220.0));
        assert_eq!(node.center(), Pos2::new(320.0, 170.0));
    }

    #[test]
    fn test_duplicate_gets_new_id_and_clears_transient_state() {
        let mut node = Node::new(NodeKind::Data, "Rows", Pos2::ZERO);
        node.flags.selected = true;
        node.flags.locked = true;
        node.status = NodeStatus::Error;

        let copy = node.duplicate();
        assert_ne!(copy.id, node.id);
        assert_eq!(copy.label, "Rows (copy)");
        assert!(!copy.flags.selected);
        assert!(!copy.flags.locked);
        assert!(copy.flags.visible);
        assert_eq!(copy.status, NodeStatus::Idle);
    }

    #[test]
    fn test_node_serializes_kind_and_status_lowercase() {
        let node = Node::new(NodeKind::Schedule, "Nightly", Pos2::new(1.0, 2.0));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "schedule");
        assert_eq!(json["status"], "idle");
        assert_eq!(json["position"], serde_json::json!([1.0, 2.0]));
    }
}
