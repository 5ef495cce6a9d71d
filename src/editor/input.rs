//! Pointer gestures on the canvas: panning and node dragging
//!
//! A gesture starts on press, tracks the pointer while the button is held, and
//! is always ended (or cancelled) before the next one can start.

use crate::editor::viewport::Viewport;
use crate::layout::{Placement, PlacementConfig};
use crate::nodes::{FlowGraph, NodeId};
use egui::{Modifiers, PointerButton, Pos2, Vec2};

/// Active toolbar tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Select,
    Pan,
}

/// Whether a press should start panning rather than selecting or dragging
pub fn is_pan_trigger(button: PointerButton, modifiers: Modifiers, tool: Tool) -> bool {
    match button {
        PointerButton::Middle => true,
        PointerButton::Primary => tool == Tool::Pan || modifiers.alt,
        _ => false,
    }
}

/// Whether a click adds to the selection instead of replacing it
pub fn is_multi_select(modifiers: Modifiers) -> bool {
    modifiers.shift || modifiers.command || modifiers.ctrl
}

#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Idle,
    Panning {
        start_pointer: Pos2,
        start_offset: Vec2,
    },
    DraggingNodes {
        /// Canvas point where the drag started
        grab: Pos2,
        origins: Vec<(NodeId, Pos2)>,
    },
}

/// Tracks the one gesture in progress
#[derive(Debug, Clone)]
pub struct GestureState {
    gesture: Gesture,
}

impl GestureState {
    pub fn new() -> Self {
        Self {
            gesture: Gesture::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.gesture, Gesture::Panning { .. })
    }

    pub fn is_dragging_nodes(&self) -> bool {
        matches!(self.gesture, Gesture::DraggingNodes { .. })
    }

    /// Starts panning from a screen point
    pub fn begin_pan(&mut self, pointer: Pos2, viewport: &Viewport) {
        self.gesture = Gesture::Panning {
            start_pointer: pointer,
            start_offset: viewport.pan_offset,
        };
    }

    /// Starts dragging every selected, unlocked node.
    ///
    /// Returns false when nothing is draggable, leaving the state idle.
    pub fn begin_node_drag(&mut self, pointer: Pos2, viewport: &Viewport, graph: &FlowGraph) -> bool {
        let origins: Vec<(NodeId, Pos2)> = graph
            .nodes
            .iter()
            .filter(|node| node.flags.selected && !node.flags.locked)
            .map(|node| (node.id, node.position))
            .collect();
        if origins.is_empty() {
            return false;
        }
        self.gesture = Gesture::DraggingNodes {
            grab: viewport.screen_to_canvas(pointer),
            origins,
        };
        true
    }

    /// Follows the pointer for whichever gesture is active
    pub fn update(&mut self, pointer: Pos2, viewport: &mut Viewport, graph: &mut FlowGraph) {
        match &self.gesture {
            Gesture::Idle => {}
            Gesture::Panning {
                start_pointer,
                start_offset,
            } => {
                viewport.pan_offset = pointer - *start_pointer + *start_offset;
            }
            Gesture::DraggingNodes { grab, origins } => {
                let delta = viewport.screen_to_canvas(pointer) - *grab;
                for (id, origin) in origins {
                    if let Err(err) = graph.move_node(*id, *origin + delta) {
                        log::debug!("Skipping drag update: {}", err);
                    }
                }
            }
        }
    }

    /// Finishes the gesture. Dragged nodes settle into free grid slots when
    /// snapping is on.
    pub fn end(&mut self, graph: &mut FlowGraph, config: &PlacementConfig) -> Vec<(NodeId, Placement)> {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        let Gesture::DraggingNodes { origins, .. } = gesture else {
            return Vec::new();
        };
        if !config.grid.enabled {
            return Vec::new();
        }

        origins
            .into_iter()
            .filter_map(|(id, _)| match graph.settle_node(id, config) {
                Ok(placement) => Some((id, placement)),
                Err(err) => {
                    log::warn!("Could not settle node {}: {}", id, err);
                    None
                }
            })
            .collect()
    }

    /// Drops the gesture without settling anything
    pub fn cancel(&mut self) {
        self.gesture = Gesture::Idle;
    }
}

impl Default for GestureState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{GridSnap, PlacementStrategy};
    use crate::nodes::{Node, NodeKind};

    #[test]
    fn test_pan_triggers() {
        let none = Modifiers::default();
        let alt = Modifiers {
            alt: true,
            ..Modifiers::default()
        };
        assert!(is_pan_trigger(PointerButton::Middle, none, Tool::Select));
        assert!(is_pan_trigger(PointerButton::Primary, alt, Tool::Select));
        assert!(is_pan_trigger(PointerButton::Primary, none, Tool::Pan));
        assert!(!is_pan_trigger(PointerButton::Primary, none, Tool::Select));
        assert!(!is_pan_trigger(PointerButton::Secondary, alt, Tool::Pan));
    }

    #[test]
    fn test_pan_tracks_pointer_without_bounds() {
        let mut viewport = Viewport {
            pan_offset: Vec2::new(30.0, 40.0),
            zoom: 1.7,
        };
        let mut graph = FlowGraph::new();
        let mut gestures = GestureState::new();

        gestures.begin_pan(Pos2::new(100.0, 100.0), &viewport);
        gestures.update(Pos2::new(150.0, 80.0), &mut viewport, &mut graph);
        assert_eq!(viewport.pan_offset, Vec2::new(80.0, 20.0));
        gestures.update(Pos2::new(-9000.0, 100.0), &mut viewport, &mut graph);
        assert_eq!(viewport.pan_offset, Vec2::new(-9070.0, 40.0));

        assert!(gestures.end(&mut graph, &PlacementConfig::default()).is_empty());
        assert!(gestures.is_idle());
    }

    #[test]
    fn test_node_drag_moves_selection_in_canvas_space() {
        let mut viewport = Viewport {
            pan_offset: Vec2::ZERO,
            zoom: 2.0,
        };
        let mut graph = FlowGraph::new();
        let id = graph.add_node(Node::new(NodeKind::Action, "drag", Pos2::ZERO));
        graph.select_only(id);

        let mut gestures = GestureState::new();
        assert!(gestures.begin_node_drag(Pos2::new(20.0, 20.0), &viewport, &graph));
        gestures.update(Pos2::new(220.0, 120.0), &mut viewport, &mut graph);
        // 200 x 100 screen pixels at 2x zoom
        assert_eq!(graph.node(id).unwrap().position, Pos2::new(100.0, 50.0));
    }

    #[test]
    fn test_drag_end_settles_into_free_slot() {
        let mut viewport = Viewport::new();
        let mut graph = FlowGraph::new();
        graph.add_node(Node::new(NodeKind::Trigger, "fixed", Pos2::ZERO));
        let id = graph.add_node(Node::new(NodeKind::Action, "moving", Pos2::new(440.0, 0.0)));
        graph.select_only(id);

        let mut gestures = GestureState::new();
        gestures.begin_node_drag(Pos2::new(450.0, 10.0), &viewport, &graph);
        gestures.update(Pos2::new(20.0, 20.0), &mut viewport, &mut graph);
        let settled = gestures.end(&mut graph, &PlacementConfig::default());

        assert_eq!(settled.len(), 1);
        assert_eq!(settled[0].1.strategy, PlacementStrategy::ShiftedRight(1));
        assert_eq!(graph.node(id).unwrap().position, Pos2::new(220.0, 0.0));
    }

    #[test]
    fn test_drag_end_without_snap_keeps_free_position() {
        let mut viewport = Viewport::new();
        let mut graph = FlowGraph::new();
        let id = graph.add_node(Node::new(NodeKind::Action, "free", Pos2::ZERO));
        graph.select_only(id);
        let config = PlacementConfig {
            grid: GridSnap::new(Vec2::new(220.0, 120.0), false),
            ..PlacementConfig::default()
        };

        let mut gestures = GestureState::new();
        gestures.begin_node_drag(Pos2::ZERO, &viewport, &graph);
        gestures.update(Pos2::new(33.0, 47.0), &mut viewport, &mut graph);
        assert!(gestures.end(&mut graph, &config).is_empty());
        assert_eq!(graph.node(id).unwrap().position, Pos2::new(33.0, 47.0));
    }

    #[test]
    fn test_locked_nodes_are_not_dragged() {
        let viewport = Viewport::new();
        let mut graph = FlowGraph::new();
        let id = graph.add_node(Node::new(NodeKind::Output, "pinned", Pos2::ZERO));
        graph.select_only(id);
        graph.node_mut(id).unwrap().flags.locked = true;

        let mut gestures = GestureState::new();
        assert!(!gestures.begin_node_drag(Pos2::ZERO, &viewport, &graph));
        assert!(gestures.is_idle());
    }

    #[test]
    fn test_cancel_detaches_without_settling() {
        let mut viewport = Viewport::new();
        let mut graph = FlowGraph::new();
        let id = graph.add_node(Node::new(NodeKind::Data, "d", Pos2::ZERO));
        graph.select_only(id);

        let mut gestures = GestureState::new();
        gestures.begin_node_drag(Pos2::ZERO, &viewport, &graph);
        gestures.update(Pos2::new(13.0, 7.0), &mut viewport, &mut graph);
        gestures.cancel();
        assert!(gestures.is_idle());
        assert_eq!(graph.node(id).unwrap().position, Pos2::new(13.0, 7.0));
    }
}
